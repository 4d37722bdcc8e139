/// Straight-alpha RGBA colour, byte order matches the texture upload format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn a(&self) -> u8 {
        self.0[3]
    }

    /// Same colour with alpha scaled by `coverage` (0..=255)
    pub fn with_coverage(&self, coverage: u8) -> Self {
        let a = (self.a() as u16 * coverage as u16 + 127) / 255;
        Self([self.r(), self.g(), self.b(), a as u8])
    }

    /// Read one pixel out of an RGBA8 buffer
    pub fn from_pixel(pixels: &[u8], offset: usize) -> Self {
        Self([
            pixels[offset],
            pixels[offset + 1],
            pixels[offset + 2],
            pixels[offset + 3],
        ])
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}
