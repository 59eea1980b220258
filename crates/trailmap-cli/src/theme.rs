use crossterm::style::Color;

/// Color theme for map output
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Path segments not (yet) walked
    pub path: Color,
    /// Path segments already walked
    pub trail: Color,
    /// Collected letters
    pub letter: Color,
    /// Start and end markers
    pub marker: Color,
    /// Walker position background
    pub cursor_bg: Color,
    /// Invalid characters and error text
    pub error: Color,
    /// Success/complete color
    pub success: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            path: Color::Rgb { r: 110, g: 115, b: 135 },
            trail: Color::Rgb { r: 80, g: 180, b: 255 },
            letter: Color::Rgb { r: 255, g: 210, b: 100 },
            marker: Color::Rgb { r: 255, g: 255, b: 255 },
            cursor_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            path: Color::Rgb { r: 150, g: 150, b: 165 },
            trail: Color::Rgb { r: 30, g: 100, b: 200 },
            letter: Color::Rgb { r: 200, g: 120, b: 20 },
            marker: Color::Rgb { r: 0, g: 0, b: 0 },
            cursor_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// Terminal default colours only
    pub fn plain() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Reset,
            path: Color::Reset,
            trail: Color::Reset,
            letter: Color::Reset,
            marker: Color::Reset,
            cursor_bg: Color::DarkGrey,
            error: Color::Reset,
            success: Color::Reset,
            info: Color::Reset,
            key: Color::Reset,
        }
    }
}
