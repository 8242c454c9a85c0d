#![allow(dead_code)]

pub const WHITE: u8 = 0xFF;
pub const BLACK: u8 = 0x00;

/// Header for a bitonal image followed by raw run bytes.
pub fn bitonal_stream(width: usize, height: usize, runs: &[u8]) -> Vec<u8> {
    let mut data = format!("R4\n{width}\n{height}\n").into_bytes();
    data.extend_from_slice(runs);
    data
}

/// Header, palette and big-endian run words of a color image.
pub fn color_stream(width: usize, height: usize, palette: &[[u8; 3]], words: &[u32]) -> Vec<u8> {
    let mut data = format!("R6\n{width}\n{height}\n{}\n", palette.len()).into_bytes();
    for color in palette {
        data.extend_from_slice(color);
    }
    for word in words {
        data.extend_from_slice(&word.to_be_bytes());
    }
    data
}

pub fn checkerboard(width: usize, height: usize, cell: usize) -> Vec<u8> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| if (x / cell + y / cell) % 2 == 0 { WHITE } else { BLACK }))
        .collect()
}

/// Deterministic xorshift bytes.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// RGBA gradient with one distinct color per pixel; every seventh pixel
/// is fully transparent with leftover RGB.
pub fn gradient_rgba(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let alpha = if (y * width + x) % 7 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[(x * 4) as u8, (y * 4) as u8, (x ^ y) as u8, alpha]);
        }
    }
    data
}

/// What a decoder returns for RGBA input: transparent pixels lose their RGB
/// and any other alpha becomes opaque.
pub fn expected_rgba(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|p| if p[3] == 0 { [0, 0, 0, 0] } else { [p[0], p[1], p[2], 0xFF] })
        .collect()
}
