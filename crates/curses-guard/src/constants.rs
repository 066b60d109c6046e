//! Manifest constants of the curses library.
//!
//! Colors and attributes are fixed by the ncurses ABI and are plain values.
//! Line-drawing glyphs live in the library's alternate character set map,
//! which is filled in at runtime, so a glyph only knows its map key and its
//! value is read through [`crate::Curses::acs`].

const ATTR_SHIFT: u32 = 8;

const fn attr_bit(bit: u32) -> u32 {
    1 << (bit + ATTR_SHIFT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    pub const fn value(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "COLOR_BLACK",
            Color::Red => "COLOR_RED",
            Color::Green => "COLOR_GREEN",
            Color::Yellow => "COLOR_YELLOW",
            Color::Blue => "COLOR_BLUE",
            Color::Magenta => "COLOR_MAGENTA",
            Color::Cyan => "COLOR_CYAN",
            Color::White => "COLOR_WHITE",
        }
    }
}

/// Display attribute flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Attributes,
    Normal,
    Standout,
    Underline,
    Reverse,
    Blink,
    Dim,
    Bold,
    AltCharset,
    Invis,
    Protect,
    Horizontal,
    Left,
    Low,
    Right,
    Top,
    Vertical,
}

impl Attribute {
    pub const ALL: [Attribute; 17] = [
        Attribute::Attributes,
        Attribute::Normal,
        Attribute::Standout,
        Attribute::Underline,
        Attribute::Reverse,
        Attribute::Blink,
        Attribute::Dim,
        Attribute::Bold,
        Attribute::AltCharset,
        Attribute::Invis,
        Attribute::Protect,
        Attribute::Horizontal,
        Attribute::Left,
        Attribute::Low,
        Attribute::Right,
        Attribute::Top,
        Attribute::Vertical,
    ];

    /// The attribute's bits as the library's unsigned `attr_t`.
    pub const fn bits(self) -> u32 {
        match self {
            Attribute::Attributes => !0u32 << ATTR_SHIFT,
            Attribute::Normal => 0,
            Attribute::Standout => attr_bit(8),
            Attribute::Underline => attr_bit(9),
            Attribute::Reverse => attr_bit(10),
            Attribute::Blink => attr_bit(11),
            Attribute::Dim => attr_bit(12),
            Attribute::Bold => attr_bit(13),
            Attribute::AltCharset => attr_bit(14),
            Attribute::Invis => attr_bit(15),
            Attribute::Protect => attr_bit(16),
            Attribute::Horizontal => attr_bit(17),
            Attribute::Left => attr_bit(18),
            Attribute::Low => attr_bit(19),
            Attribute::Right => attr_bit(20),
            Attribute::Top => attr_bit(21),
            Attribute::Vertical => attr_bit(22),
        }
    }

    /// The bits reinterpreted as a signed 32-bit integer.
    pub const fn value(self) -> i32 {
        self.bits() as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Attributes => "A_ATTRIBUTES",
            Attribute::Normal => "A_NORMAL",
            Attribute::Standout => "A_STANDOUT",
            Attribute::Underline => "A_UNDERLINE",
            Attribute::Reverse => "A_REVERSE",
            Attribute::Blink => "A_BLINK",
            Attribute::Dim => "A_DIM",
            Attribute::Bold => "A_BOLD",
            Attribute::AltCharset => "A_ALTCHARSET",
            Attribute::Invis => "A_INVIS",
            Attribute::Protect => "A_PROTECT",
            Attribute::Horizontal => "A_HORIZONTAL",
            Attribute::Left => "A_LEFT",
            Attribute::Low => "A_LOW",
            Attribute::Right => "A_RIGHT",
            Attribute::Top => "A_TOP",
            Attribute::Vertical => "A_VERTICAL",
        }
    }
}

/// Line-drawing glyphs of the alternate character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcsGlyph {
    UlCorner,
    UrCorner,
    LlCorner,
    LrCorner,
    LTee,
    RTee,
    BTee,
    TTee,
    HLine,
    VLine,
    Plus,
    S1,
    S9,
    Diamond,
    CkBoard,
    Degree,
    PlMinus,
    Bullet,
    LArrow,
    RArrow,
    DArrow,
    UArrow,
    Board,
    Lantern,
    Block,
    S3,
    S7,
    LEqual,
    GEqual,
    Pi,
    NEqual,
    Sterling,
    // Box aliases: one letter per side in top, right, bottom, left order,
    // S where a line leaves the cell and B where it is blank.
    Bssb,
    Ssbb,
    Bbss,
    Sbbs,
    Sbss,
    Sssb,
    Ssbs,
    Bsss,
    Bsbs,
    Sbsb,
    Ssss,
}

impl AcsGlyph {
    pub const ALL: [AcsGlyph; 43] = [
        AcsGlyph::UlCorner,
        AcsGlyph::UrCorner,
        AcsGlyph::LlCorner,
        AcsGlyph::LrCorner,
        AcsGlyph::LTee,
        AcsGlyph::RTee,
        AcsGlyph::BTee,
        AcsGlyph::TTee,
        AcsGlyph::HLine,
        AcsGlyph::VLine,
        AcsGlyph::Plus,
        AcsGlyph::S1,
        AcsGlyph::S9,
        AcsGlyph::Diamond,
        AcsGlyph::CkBoard,
        AcsGlyph::Degree,
        AcsGlyph::PlMinus,
        AcsGlyph::Bullet,
        AcsGlyph::LArrow,
        AcsGlyph::RArrow,
        AcsGlyph::DArrow,
        AcsGlyph::UArrow,
        AcsGlyph::Board,
        AcsGlyph::Lantern,
        AcsGlyph::Block,
        AcsGlyph::S3,
        AcsGlyph::S7,
        AcsGlyph::LEqual,
        AcsGlyph::GEqual,
        AcsGlyph::Pi,
        AcsGlyph::NEqual,
        AcsGlyph::Sterling,
        AcsGlyph::Bssb,
        AcsGlyph::Ssbb,
        AcsGlyph::Bbss,
        AcsGlyph::Sbbs,
        AcsGlyph::Sbss,
        AcsGlyph::Sssb,
        AcsGlyph::Ssbs,
        AcsGlyph::Bsss,
        AcsGlyph::Bsbs,
        AcsGlyph::Sbsb,
        AcsGlyph::Ssss,
    ];

    /// The glyph's index into the alternate character set map (its VT100
    /// graphics character).
    pub const fn key(self) -> u8 {
        match self {
            AcsGlyph::UlCorner | AcsGlyph::Bssb => b'l',
            AcsGlyph::UrCorner | AcsGlyph::Bbss => b'k',
            AcsGlyph::LlCorner | AcsGlyph::Ssbb => b'm',
            AcsGlyph::LrCorner | AcsGlyph::Sbbs => b'j',
            AcsGlyph::LTee | AcsGlyph::Sssb => b't',
            AcsGlyph::RTee | AcsGlyph::Sbss => b'u',
            AcsGlyph::BTee | AcsGlyph::Ssbs => b'v',
            AcsGlyph::TTee | AcsGlyph::Bsss => b'w',
            AcsGlyph::HLine | AcsGlyph::Bsbs => b'q',
            AcsGlyph::VLine | AcsGlyph::Sbsb => b'x',
            AcsGlyph::Plus | AcsGlyph::Ssss => b'n',
            AcsGlyph::S1 => b'o',
            AcsGlyph::S9 => b's',
            AcsGlyph::Diamond => b'`',
            AcsGlyph::CkBoard => b'a',
            AcsGlyph::Degree => b'f',
            AcsGlyph::PlMinus => b'g',
            AcsGlyph::Bullet => b'~',
            AcsGlyph::LArrow => b',',
            AcsGlyph::RArrow => b'+',
            AcsGlyph::DArrow => b'.',
            AcsGlyph::UArrow => b'-',
            AcsGlyph::Board => b'h',
            AcsGlyph::Lantern => b'i',
            AcsGlyph::Block => b'0',
            AcsGlyph::S3 => b'p',
            AcsGlyph::S7 => b'r',
            AcsGlyph::LEqual => b'y',
            AcsGlyph::GEqual => b'z',
            AcsGlyph::Pi => b'{',
            AcsGlyph::NEqual => b'|',
            AcsGlyph::Sterling => b'}',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AcsGlyph::UlCorner => "ACS_ULCORNER",
            AcsGlyph::UrCorner => "ACS_URCORNER",
            AcsGlyph::LlCorner => "ACS_LLCORNER",
            AcsGlyph::LrCorner => "ACS_LRCORNER",
            AcsGlyph::LTee => "ACS_LTEE",
            AcsGlyph::RTee => "ACS_RTEE",
            AcsGlyph::BTee => "ACS_BTEE",
            AcsGlyph::TTee => "ACS_TTEE",
            AcsGlyph::HLine => "ACS_HLINE",
            AcsGlyph::VLine => "ACS_VLINE",
            AcsGlyph::Plus => "ACS_PLUS",
            AcsGlyph::S1 => "ACS_S1",
            AcsGlyph::S9 => "ACS_S9",
            AcsGlyph::Diamond => "ACS_DIAMOND",
            AcsGlyph::CkBoard => "ACS_CKBOARD",
            AcsGlyph::Degree => "ACS_DEGREE",
            AcsGlyph::PlMinus => "ACS_PLMINUS",
            AcsGlyph::Bullet => "ACS_BULLET",
            AcsGlyph::LArrow => "ACS_LARROW",
            AcsGlyph::RArrow => "ACS_RARROW",
            AcsGlyph::DArrow => "ACS_DARROW",
            AcsGlyph::UArrow => "ACS_UARROW",
            AcsGlyph::Board => "ACS_BOARD",
            AcsGlyph::Lantern => "ACS_LANTERN",
            AcsGlyph::Block => "ACS_BLOCK",
            AcsGlyph::S3 => "ACS_S3",
            AcsGlyph::S7 => "ACS_S7",
            AcsGlyph::LEqual => "ACS_LEQUAL",
            AcsGlyph::GEqual => "ACS_GEQUAL",
            AcsGlyph::Pi => "ACS_PI",
            AcsGlyph::NEqual => "ACS_NEQUAL",
            AcsGlyph::Sterling => "ACS_STERLING",
            AcsGlyph::Bssb => "ACS_BSSB",
            AcsGlyph::Ssbb => "ACS_SSBB",
            AcsGlyph::Bbss => "ACS_BBSS",
            AcsGlyph::Sbbs => "ACS_SBBS",
            AcsGlyph::Sbss => "ACS_SBSS",
            AcsGlyph::Sssb => "ACS_SSSB",
            AcsGlyph::Ssbs => "ACS_SSBS",
            AcsGlyph::Bsss => "ACS_BSSS",
            AcsGlyph::Bsbs => "ACS_BSBS",
            AcsGlyph::Sbsb => "ACS_SBSB",
            AcsGlyph::Ssss => "ACS_SSSS",
        }
    }
}
