//! Page copy
//!
//! The display records the list sections render. These are plain content
//! data consumed by the visual layer; the engine only observes the blocks
//! they sit in.

/// One drink entry in a menu list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayRecord {
    pub name: &'static str,
    pub origin: &'static str,
    pub description: &'static str,
    pub price: &'static str,
}

/// One navigation link
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub id: &'static str,
    pub title: &'static str,
}

pub const NAV_LINKS: [NavLink; 4] = [
    NavLink {
        id: "cocktails",
        title: "Cocktails",
    },
    NavLink {
        id: "about",
        title: "About Us",
    },
    NavLink {
        id: "art",
        title: "The Art",
    },
    NavLink {
        id: "contact",
        title: "Contact",
    },
];

pub const COCKTAIL_LISTS: [DisplayRecord; 4] = [
    DisplayRecord {
        name: "Chapel Hill Shiraz",
        origin: "AU",
        description: "Battle",
        price: "$10",
    },
    DisplayRecord {
        name: "Catena Malbec",
        origin: "AU",
        description: "Battle",
        price: "$49",
    },
    DisplayRecord {
        name: "Rancho Zabaco",
        origin: "US",
        description: "750 ml",
        price: "$20",
    },
    DisplayRecord {
        name: "Irish Guinness",
        origin: "IE",
        description: "600 ml",
        price: "$29",
    },
];

pub const MOCKTAIL_LISTS: [DisplayRecord; 4] = [
    DisplayRecord {
        name: "Tropical Bloom",
        origin: "US",
        description: "Battle",
        price: "$10",
    },
    DisplayRecord {
        name: "Passionfruit Mint",
        origin: "US",
        description: "Battle",
        price: "$49",
    },
    DisplayRecord {
        name: "Citrus Glow",
        origin: "CA",
        description: "750 ml",
        price: "$20",
    },
    DisplayRecord {
        name: "Lavender Fizz",
        origin: "IE",
        description: "600 ml",
        price: "$29",
    },
];

/// Bullet points that fade out during the art section's pinned sequence
pub const GOOD_LISTS: [&str; 4] = [
    "Handpicked ingredients",
    "Signature techniques",
    "Bartending artistry in action",
    "Freshly muddled flavors",
];

pub const FEATURE_LISTS: [&str; 4] = [
    "Perfectly balanced blends",
    "Garnished to perfection",
    "Ice-cold every time",
    "Expertly shaken & stirred",
];

/// Hero copy: the title is split to characters, the subtitle to lines
pub const HERO_TITLE: &str = "MOJITO";
pub const HERO_SUBTITLE: &str = "Sip the Spirit\nof Summer";
