use serde::{Deserialize, Serialize};

/// A preview record. `id` is the identity key; two samples with the same id
/// are the same history entry whatever their prompt says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub id: u32,
    pub prompt: String,
    pub image_url: String,
}

impl Sample {
    /// Same id and image, different prompt.
    pub fn with_prompt(&self, prompt: impl Into<String>) -> Self {
        Self { id: self.id, prompt: prompt.into(), image_url: self.image_url.clone() }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: u32,
    pub prompt: &'static str,
    pub image_url: &'static str,
}

impl CatalogEntry {
    pub fn to_sample(&self) -> Sample {
        Sample { id: self.id, prompt: self.prompt.to_string(), image_url: self.image_url.to_string() }
    }
}

pub const DEFAULT_PROMPT: &str =
    "Futuristic eco city skyline at golden hour, aerial view, lush biophilic design";

static CATALOG: [CatalogEntry; 4] = [
    CatalogEntry {
        id: 1,
        prompt: "Cinematic portrait of a neon samurai, volumetric lighting, ultra sharp, anamorphic lens flare",
        image_url: "https://images.unsplash.com/photo-1524504388940-b1c1722653e1?auto=format&fit=crop&w=1200&q=80",
    },
    CatalogEntry {
        id: 2,
        prompt: "Moody product render of wireless earbuds on marble pedestal, dramatic rim light, premium aesthetic",
        image_url: "https://images.unsplash.com/photo-1511379938547-c1f69419868d?auto=format&fit=crop&w=1200&q=80",
    },
    CatalogEntry {
        id: 3,
        prompt: "Whimsical children’s book illustration of a fox piloting a hot air balloon over mountains at sunrise",
        image_url: "https://images.unsplash.com/photo-1545239351-1141bd82e8a6?auto=format&fit=crop&w=1200&q=80",
    },
    CatalogEntry {
        id: 4,
        prompt: "Isometric sci-fi cityscape, glowing signage, reflective puddles, cinematic depth of field",
        image_url: "https://images.unsplash.com/photo-1526481280695-3c469928b67b?auto=format&fit=crop&w=1200&q=80",
    },
];

/// The fixed sample set mock generation draws from. Never empty.
pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

/// What a fresh session shows before anything is generated.
pub fn initial_sample() -> Sample {
    CATALOG[0].to_sample()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<u32> = catalog().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), catalog().len());
        assert_eq!(catalog().len(), 4);
    }

    #[test]
    fn initial_sample_is_first_entry() {
        assert_eq!(initial_sample().id, 1);
    }

    #[test]
    fn fox_prompt_uses_typographic_apostrophe() {
        assert_eq!(
            catalog()[2].prompt,
            "Whimsical children\u{2019}s book illustration of a fox piloting a hot air balloon over mountains at sunrise"
        );
    }

    #[test]
    fn with_prompt_keeps_identity() {
        let s = initial_sample().with_prompt("  red bicycle ");
        assert_eq!(s.id, 1);
        assert_eq!(s.prompt, "  red bicycle ");
        assert_eq!(s.image_url, catalog()[0].image_url);
    }
}
