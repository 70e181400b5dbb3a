use serde::Serialize;

/// A single tarot card. Cards only ever come from [`CATALOG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Card {
    pub name: &'static str,
    pub meaning: &'static str,
}

/// The deck readings are drawn from. Index positions are part of the
/// selection contract: reordering changes every reading.
pub static CATALOG: &[Card] = &[
    Card {
        name: "The Fool",
        meaning: "New beginnings, adventure, spontaneity",
    },
    Card {
        name: "The Magician",
        meaning: "Manifestation, resourcefulness, power",
    },
    Card {
        name: "The High Priestess",
        meaning: "Intuition, mystery, wisdom",
    },
    Card {
        name: "The Empress",
        meaning: "Nurturing, abundance, beauty",
    },
    Card {
        name: "The Emperor",
        meaning: "Authority, structure, stability",
    },
    Card {
        name: "The Hierophant",
        meaning: "Tradition, spirituality, guidance",
    },
    Card {
        name: "The Lovers",
        meaning: "Love, harmony, choices",
    },
    Card {
        name: "The Chariot",
        meaning: "Determination, control, victory",
    },
    Card {
        name: "Strength",
        meaning: "Courage, patience, inner strength",
    },
    Card {
        name: "The Hermit",
        meaning: "Reflection, solitude, wisdom",
    },
];
