//! Static palette catalogs: fonts, stamps and stickers.

/// A font palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontOption {
    pub id: &'static str,
    pub label: &'static str,
    /// CSS font family list.
    pub family: &'static str,
    /// Text given to labels created from this entry.
    pub sample_text: &'static str,
}

/// An image palette entry (stamps and stickers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageOption {
    pub id: &'static str,
    pub label: &'static str,
    /// Image reference.
    pub src: &'static str,
}

pub type StampOption = ImageOption;
pub type StickerOption = ImageOption;

/// Image shown in the stamp slot before a stamp is chosen.
pub const STAMP_EMPTY: &str = "assets/stamp-empty.svg";

pub static FONT_OPTIONS: &[FontOption] = &[
    FontOption {
        id: "playwrite",
        label: "Playwrite US Modern",
        family: "Playwrite US Modern, Playpen Sans",
        sample_text: "Warm hello",
    },
    FontOption {
        id: "poppins",
        label: "Poppins",
        family: "Poppins, Noto Sans",
        sample_text: "Little note",
    },
    FontOption {
        id: "great-vibes",
        label: "Great Vibes",
        family: "Great Vibes",
        sample_text: "Sending love",
    },
];

pub static STAMP_OPTIONS: &[StampOption] = &[
    ImageOption { id: "piggy", label: "Piggy", src: "assets/stamps/stamp-piggy.svg" },
    ImageOption { id: "cloud", label: "Cloud", src: "assets/stamps/stamp-cloud.svg" },
    ImageOption { id: "choco", label: "Chocolate", src: "assets/stamps/stamp-choco.svg" },
    ImageOption { id: "italy", label: "Italy", src: "assets/stamps/stamp-italy.svg" },
    ImageOption { id: "mountain", label: "Mountain", src: "assets/stamps/stamp-mountain.svg" },
    ImageOption { id: "christmas", label: "Christmas", src: "assets/stamps/stamp-christmas.svg" },
];

pub static STICKER_OPTIONS: &[StickerOption] = &[
    ImageOption { id: "fire", label: "Fire", src: "assets/stickers/fire.svg" },
    ImageOption { id: "heart", label: "Heart", src: "assets/stickers/heart.svg" },
    ImageOption { id: "flash", label: "Flash", src: "assets/stickers/flash.svg" },
    ImageOption { id: "fireworks", label: "Fireworks", src: "assets/stickers/fireworks.svg" },
    ImageOption { id: "sun", label: "Sun", src: "assets/stickers/sun.svg" },
    ImageOption { id: "mail", label: "Mail", src: "assets/stickers/mail.svg" },
    ImageOption { id: "send", label: "Send", src: "assets/stickers/send.svg" },
    ImageOption { id: "shine", label: "Shine", src: "assets/stickers/shine.svg" },
    ImageOption { id: "smile", label: "Smile", src: "assets/stickers/smile.svg" },
    ImageOption {
        id: "smiley-blessed",
        label: "Smiley Blessed",
        src: "assets/stickers/smiley-blessed--Streamline-Freehand.svg",
    },
    ImageOption { id: "kiss", label: "Kiss", src: "assets/stickers/kiss.svg" },
    ImageOption { id: "thumbsup", label: "Thumbs Up", src: "assets/stickers/thumbsup.svg" },
];

/// Look up a font entry by id.
pub fn font(id: &str) -> Option<&'static FontOption> {
    FONT_OPTIONS.iter().find(|o| o.id == id)
}

/// Look up a stamp entry by id.
pub fn stamp(id: &str) -> Option<&'static StampOption> {
    STAMP_OPTIONS.iter().find(|o| o.id == id)
}

/// Look up a sticker entry by id.
pub fn sticker(id: &str) -> Option<&'static StickerOption> {
    STICKER_OPTIONS.iter().find(|o| o.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup() {
        assert_eq!(font("great-vibes").map(|f| f.family), Some("Great Vibes"));
        assert_eq!(stamp("choco").map(|s| s.label), Some("Chocolate"));
        assert_eq!(sticker("thumbsup").map(|s| s.label), Some("Thumbs Up"));
        assert!(sticker("piggy").is_none());
    }

    #[test]
    fn test_ids_unique_per_catalog() {
        let fonts: HashSet<_> = FONT_OPTIONS.iter().map(|o| o.id).collect();
        let stamps: HashSet<_> = STAMP_OPTIONS.iter().map(|o| o.id).collect();
        let stickers: HashSet<_> = STICKER_OPTIONS.iter().map(|o| o.id).collect();

        assert_eq!(fonts.len(), FONT_OPTIONS.len());
        assert_eq!(stamps.len(), STAMP_OPTIONS.len());
        assert_eq!(stickers.len(), STICKER_OPTIONS.len());
    }
}
