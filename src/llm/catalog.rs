//! Models offered to callers of the key-supplied chat endpoint

/// One selectable model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const OPENAI_MODELS: &[CatalogEntry] = &[
    CatalogEntry {
        id: "gpt-4o-mini",
        name: "GPT-4o Mini",
        description: "Rapide et économique",
    },
    CatalogEntry {
        id: "gpt-4o",
        name: "GPT-4o",
        description: "Modèle principal d'OpenAI",
    },
    CatalogEntry {
        id: "gpt-4",
        name: "GPT-4",
        description: "Modèle GPT-4 standard",
    },
    CatalogEntry {
        id: "gpt-5",
        name: "GPT-5",
        description: "Dernier modèle OpenAI (si disponible)",
    },
];
