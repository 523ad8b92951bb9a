//! Canned replies used when no LLM answer is available.
//!
//! The selector lower-cases the message and walks [`RULES`] in order; the
//! first topic with a keyword contained in the text wins.

use serde::Serialize;

/// Conversation topic recognised by the keyword selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Pricing,
    Greeting,
    Payment,
    Delay,
    Restaurant,
    Commerce,
    Services,
    Urgency,
    Guarantees,
    WhatsApp,
    /// Nothing matched
    General,
}

/// Ordered keyword table. Pricing is checked first so that any message
/// mentioning a price gets the price grid, even with a greeting in front.
pub const RULES: &[(Topic, &[&str])] = &[
    (Topic::Pricing, &["prix", "tarif", "coût", "cout", "combien", "budget"]),
    (Topic::Greeting, &["bonjour", "salut", "hello", "bonsoir", "coucou"]),
    (Topic::Payment, &["paiement", "payer", "acompte", "échelonné", "50/40/10"]),
    (Topic::Delay, &["délai", "delai", "temps", "rapidité", "livraison", "quand"]),
    (Topic::Restaurant, &["restaurant", "resto", "cuisine", "plat"]),
    (Topic::Commerce, &["commerce", "boutique", "magasin", "vente"]),
    (Topic::Services, &["service", "conseil", "b2b", "prestation"]),
    (Topic::Urgency, &["urgent", "vite", "rapidement", "asap", "pressé"]),
    (Topic::Guarantees, &["garantie", "sécurisé", "remboursé", "risque", "confiance"]),
    (Topic::WhatsApp, &["whatsapp", "appeler", "téléphone"]),
];

const GREETING_REPLY: &str = "Bonjour ! 😊 Je suis Élise, votre conseillère commerciale WebBoost Martinique.

Je suis spécialisée dans l'accompagnement des entreprises martiniquaises pour leur transformation digitale.

**Mes domaines d'expertise :**
🎯 Conversion digitale TPE/PME
🇲🇶 Marché martiniquais
📱 Sites mobiles performants
💰 Optimisation ROI web

Comment puis-je vous aider avec votre projet web aujourd'hui ?";

const PRICING_REPLY: &str = "💰 **Excellente question ! Nos tarifs sont spécialement adaptés au marché martiniquais :**

**Pack Essentiel** - 890€ HT
• 3 pages professionnelles + SEO base
• Acompte : 445€ seulement
• Délai : 10 jours max

**Pack Pro** - 1 290€ HT ⭐ (Le plus populaire)
• 5-6 pages + SEO étendu + GA4
• Acompte : 645€ seulement
• Délai : 7-10 jours max

**Pack Premium** - 1 790€ HT
• 6-8 pages + conversion + formation
• Acompte : 895€ seulement
• Délai : 10-12 jours max

**Paiement échelonné 50/40/10 - Pour quel secteur d'activité ?**";

const PAYMENT_REPLY: &str = "💳 **Modalités de paiement 50/40/10 :**

• **50%** à la commande, pour lancer votre projet
• **40%** avant la mise en ligne, après validation de la maquette
• **10%** à la livraison finale

Exemple Pack Pro (1 290€ HT) : 645€ à la commande, 516€ avant mise en ligne, 129€ à la livraison.

Révisions incluses selon le pack choisi. Paiement 100% sécurisé.

Souhaitez-vous que je vous prépare un devis personnalisé ?";

const DELAY_REPLY: &str = "⚡ **Notre signature : la rapidité martiniquaise !**

Contrairement à la concurrence (6-8 semaines), nous livrons en **7 à 12 jours ouvrés maximum**.

**Pourquoi si rapide ?**
✅ Équipe 100% locale (pas de décalage horaire)
✅ Process optimisé depuis 3 ans
✅ Communication directe WhatsApp/téléphone
✅ Pas de sous-traitance à l'étranger

**Vos délais garantis :**
• Pack Essentiel : 10 jours maximum
• Pack Pro : 7-10 jours maximum
• Pack Premium : 10-12 jours maximum

Délais déclenchés à réception complète de vos contenus. **Délai non respecté = remboursement intégral.** 🛡️

Pour quel type d'entreprise est-ce ?";

const RESTAURANT_REPLY: &str = "🍽️ **Parfait ! Les restaurants sont ma spécialité !**

Pour votre restaurant, je recommande fortement le **Pack Pro** (1 290€ HT) car il inclut :

✨ **Galerie photos optimisée** - Mettez vos plats en valeur
📱 **Système de réservation** - Plus de clients le soir
🇲🇶 **SEO local renforcé** - Apparaître dans \"restaurant [votre ville]\"
⭐ **Gestion avis Google** - E-réputation contrôlée

**Acompte : seulement 645€ pour commencer**

Avez-vous déjà un site web actuellement ? Combien de couverts faites-vous ?";

const COMMERCE_REPLY: &str = "🛍️ **Excellent ! Le commerce local, c'est mon domaine !**

Selon votre ambition, 2 options parfaites :

**Pack Essentiel** (890€ HT) - Boutique physique établie
• Site vitrine élégant + informations pratiques
• Acompte : 445€

**Pack Pro** (1 290€ HT) - Développement commercial
• Catalogue produits + SEO local renforcé
• Acompte : 645€

**Que vendez-vous exactement ?** (vêtements, alimentaire, artisanat...)
Cela m'aidera à personnaliser mes recommandations ! 😊";

const SERVICES_REPLY: &str = "💼 **Services B2B ! Excellent secteur pour la conversion !**

Les entreprises de services ont souvent les **meilleurs retours** avec nos sites :

🎯 **Pack Pro recommandé** (1 290€ HT)
• Pages services détaillées et optimisées
• Formulaires de devis/contact avancés
• Témoignages clients intégrés
• SEO \"services [votre domaine] [votre ville]\"

**Acompte : 645€ pour démarrer**

**Quel type de services proposez-vous ?** (conseil, maintenance, formation, expertise...)";

const URGENCY_REPLY: &str = "🚨 **Urgence parfaitement comprise !**

Pour un traitement express :
📱 **Kenneson en direct** - Contact dans l'heure
⚡ **Démarrage immédiat** si brief complet
🎯 **Priorité absolue** sur planning

**Contact urgence :** https://wa.me/596000000

**Quelle est votre situation ?**
• Lancement imminent ?
• Concurrent agressif ?
• Saison haute qui arrive ?

Je trouve la solution adaptée ! 💪";

const GUARANTEES_REPLY: &str = "🛡️ **Toutes mes garanties personnelles :**

✅ **Satisfait ou remboursé** - 15 jours complets
✅ **Délai respecté ou remboursé** - Engagement ferme
✅ **Paiement 100% sécurisé** - Stripe certifié SSL
✅ **Support 7j/7** pendant tout votre projet
✅ **Révisions incluses** selon votre pack
✅ **Anti-bug gratuit** - 15 jours post-livraison

**En 3 ans : 0% de remboursement demandé !** 🏆

Qu'est-ce qui vous préoccupe le plus dans votre projet ?";

const WHATSAPP_REPLY: &str = "📱 **Échangeons directement !**

Contactez-nous sur WhatsApp pour un échange personnalisé : https://wa.me/596000000

Réponse rapide 7j/7 pendant votre projet. Vous pouvez aussi laisser vos coordonnées via le formulaire de contact, je vous rappelle sous 24h ouvrées.";

const GENERAL_REPLY: &str = "😊 **Merci de votre intérêt pour WebBoost !**

Je suis Élise, spécialisée dans l'accompagnement des entrepreneurs martiniquais pour leur transformation digitale.

**Pour mieux vous conseiller de manière personnalisée :**
• Quel type d'entreprise dirigez-vous ?
• Avez-vous un site web actuellement ?
• Quel est votre objectif principal ?

**Mon rôle :** vous trouver LA solution parfaite selon votre situation unique ! 🎯

Par quoi souhaitez-vous commencer ?";

impl Topic {
    /// Canned reply for this topic
    pub fn reply(self) -> &'static str {
        match self {
            Topic::Pricing => PRICING_REPLY,
            Topic::Greeting => GREETING_REPLY,
            Topic::Payment => PAYMENT_REPLY,
            Topic::Delay => DELAY_REPLY,
            Topic::Restaurant => RESTAURANT_REPLY,
            Topic::Commerce => COMMERCE_REPLY,
            Topic::Services => SERVICES_REPLY,
            Topic::Urgency => URGENCY_REPLY,
            Topic::Guarantees => GUARANTEES_REPLY,
            Topic::WhatsApp => WHATSAPP_REPLY,
            Topic::General => GENERAL_REPLY,
        }
    }

    /// Keywords that select this topic (empty for [`Topic::General`])
    pub fn keywords(self) -> &'static [&'static str] {
        RULES
            .iter()
            .find(|(topic, _)| *topic == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }
}

/// Classify a free-text message into a topic
pub fn classify(message: &str) -> Topic {
    let text = message.to_lowercase();

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::General)
}

/// Pick the canned reply for a message
pub fn select_reply(message: &str) -> &'static str {
    classify(message).reply()
}
