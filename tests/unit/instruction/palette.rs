use super::*;
use crate::foundation::core::Rgb8;

#[test]
fn parse_unpacks_twelve_bit_colors() {
    let mut data = [0u8; 16];
    // r=15 g=0 b=0
    data[0] = 0b11_1100;
    data[1] = 0b00_0000;
    // r=0 g=15 b=0
    data[2] = 0b00_0011;
    data[3] = 0b11_0000;
    // r=0 g=0 b=15
    data[4] = 0b00_0000;
    data[5] = 0b00_1111;
    // r=5 g=10 b=3, with P/Q bits set
    data[6] = 0xC0 | 0b01_0110;
    data[7] = 0xC0 | 0b10_0011;

    let p = LoadPalette::parse(&data, PaletteHalf::Low);
    assert_eq!(p.colors[0], [15, 0, 0]);
    assert_eq!(p.colors[1], [0, 15, 0]);
    assert_eq!(p.colors[2], [0, 0, 15]);
    assert_eq!(p.colors[3], [5, 10, 3]);
    assert_eq!(p.colors[7], [0, 0, 0]);
}

#[test]
fn low_half_writes_entries_zero_to_seven() {
    let mut ctx = DisplayContext::new();
    let mut colors = [[0u8; 3]; 8];
    colors[0] = [15, 0, 0];
    colors[7] = [1, 2, 3];
    LoadPalette {
        half: PaletteHalf::Low,
        colors,
    }
    .apply(&mut ctx);

    assert_eq!(ctx.palette()[0], Rgb8::new(255, 0, 0));
    assert_eq!(ctx.palette()[7], Rgb8::new(17, 34, 51));
    assert_eq!(ctx.palette()[8], Rgb8::BLACK);
}

#[test]
fn high_half_writes_entries_eight_to_fifteen() {
    let mut ctx = DisplayContext::new();
    LoadPalette {
        half: PaletteHalf::High,
        colors: [[15, 15, 15]; 8],
    }
    .apply(&mut ctx);

    for i in 0..8 {
        assert_eq!(ctx.palette()[i], Rgb8::BLACK);
    }
    for i in 8..16 {
        assert_eq!(ctx.palette()[i], Rgb8::new(255, 255, 255));
    }
}
