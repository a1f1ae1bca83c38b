use std::ops::Deref;

use image::{GrayImage, Luma};
use log::warn;

use crate::iter::DATA_POSITIONS;
use crate::metadata::*;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

impl Module {
    // 1 for dark, 0 for light, None while unset
    pub fn bit(&self) -> Option<u8> {
        match self {
            Module::Empty => None,
            Module::Func(c) | Module::Format(c) | Module::Data(c) => Some(*c as u8),
        }
    }
}

const GRID_SIZE: usize = WIDTH * WIDTH;

#[derive(Debug, Clone)]
pub struct QR {
    grid: Box<[Module; GRID_SIZE]>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl Default for QR {
    fn default() -> Self {
        Self::new()
    }
}

impl QR {
    pub fn new() -> Self {
        Self { grid: Box::new([Module::Empty; GRID_SIZE]) }
    }

    // Blank symbol with every function pattern and the format info in place
    pub fn template() -> Self {
        let mut qr = Self::new();
        qr.draw_all_function_patterns();
        qr.draw_format_info(FORMAT_INFO);
        qr
    }

    pub fn width(&self) -> usize {
        WIDTH
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    pub fn count_empty_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(m, Module::Empty)).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = WIDTH as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = WIDTH as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }

    // Row major 0/1 cells, None where nothing was placed
    pub fn to_matrix(&self) -> Vec<Vec<Option<u8>>> {
        self.grid.chunks(WIDTH).map(|row| row.iter().map(Module::bit).collect()).collect()
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 finder centred at (r, c) along with the separator on the
    // sides facing the symbol interior
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_left, dr_right) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_top, dc_bottom) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_left..=dr_right {
            for j in dc_top..=dc_bottom {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod finder_pattern_tests {
    use crate::builder::QR;

    #[test]
    fn test_finder_pattern_qr() {
        let mut qr = QR::new();
        qr.draw_finder_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.....Ffffffff\n\
             fFFFFFfF.....FfFFFFFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFFFFFfF.....FfFFFFFf\n\
             fffffffF.....Ffffffff\n\
             FFFFFFFF.....FFFFFFFF\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             FFFFFFFF.............\n\
             fffffffF.............\n\
             fFFFFFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFFFFFfF.............\n\
             fffffffF.............\n"
        );
    }
}

// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = WIDTH as i16;
        let (off, last) = (TIMING_LINE, w - 9);
        self.draw_line(off, 8, off, last);
        self.draw_line(8, off, last, off);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                self.set(r1, j, Module::Func(Color::from(j & 1 == 0)));
            }
        } else {
            for i in r1..=r2 {
                self.set(i, c1, Module::Func(Color::from(i & 1 == 0)));
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_dark_module();
    }

    fn draw_dark_module(&mut self) {
        let (r, c) = DARK_MODULE;
        self.set(r, c, Module::Func(Color::Dark));
    }
}


// Format info
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_format_info(&mut self, format_info: u32) {
        self.draw_number(
            format_info,
            FORMAT_INFO_BIT_LEN,
            Module::Format(Color::Light),
            Module::Format(Color::Dark),
            &FORMAT_INFO_COORDS_MAIN,
        );
        self.draw_number(
            format_info,
            FORMAT_INFO_BIT_LEN,
            Module::Format(Color::Light),
            Module::Format(Color::Dark),
            &FORMAT_INFO_COORDS_SIDE,
        );
    }

    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for (r, c) in coords {
            if number & mask == 0 {
                self.set(*r, *c, off_clr);
            } else {
                self.set(*r, *c, on_clr);
            }
            mask >>= 1;
        }
    }
}

#[cfg(test)]
mod format_info_tests {
    use crate::builder::QR;
    use crate::common::metadata::FORMAT_INFO;

    #[test]
    fn test_format_info_placement() {
        let qr = QR::template();
        assert_eq!(FORMAT_INFO, 0x77C4);
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFM....Ffffffff\n\
             fFFFFFfFM....FfFFFFFf\n\
             fFfffFfFm....FfFfffFf\n\
             fFfffFfFM....FfFfffFf\n\
             fFfffFfFM....FfFfffFf\n\
             fFFFFFfFM....FfFFFFFf\n\
             fffffffFfFfFfFfffffff\n\
             FFFFFFFFm....FFFFFFFF\n\
             mmmMmmfmm....mmMMMmMM\n\
             ......F..............\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             FFFFFFFFf............\n\
             fffffffFm............\n\
             fFFFFFfFm............\n\
             fFfffFfFm............\n\
             fFfffFfFM............\n\
             fFfffFfFm............\n\
             fFFFFFfFm............\n\
             fffffffFm............\n"
        );
    }

    #[test]
    fn test_format_copies_agree() {
        let qr = QR::template();
        let main: Vec<_> = crate::metadata::FORMAT_INFO_COORDS_MAIN
            .iter()
            .map(|&(r, c)| qr.get(r, c))
            .collect();
        let side: Vec<_> = crate::metadata::FORMAT_INFO_COORDS_SIDE
            .iter()
            .map(|&(r, c)| qr.get(r, c))
            .collect();
        assert_eq!(main, side);
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    // Threads bits through the data positions in sequence order and returns
    // the sequence numbers that received a dark module. Positions past the
    // end of the payload stay empty.
    pub fn draw_payload(&mut self, payload: impl IntoIterator<Item = bool>) -> Vec<usize> {
        let mut payload = payload.into_iter();
        let mut black = Vec::new();
        for pos in DATA_POSITIONS.iter() {
            let Some(bit) = payload.next() else {
                let placed = pos.seq - 1;
                warn!("Payload ended early: {placed} of {TOTAL_BIT_CAPACITY} data modules set");
                return black;
            };
            debug_assert!(
                matches!(self.get(pos.row, pos.col), Module::Empty),
                "Data position already occupied: {pos:?}"
            );
            self.set(pos.row, pos.col, Module::Data(Color::from(bit)));
            if bit {
                black.push(pos.seq);
            }
        }
        let extra = payload.count();
        if extra > 0 {
            warn!("Ignoring {extra} payload bits beyond {TOTAL_BIT_CAPACITY} data modules");
        }
        black
    }
}


// Render
//------------------------------------------------------------------------------

const QUIET_ZONE: usize = 4;

impl QR {
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE as u32 * module_sz;
        let qr_sz = WIDTH as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::new(total_sz, total_sz);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.put_pixel(j, i, Luma([255]));
                    continue;
                }
                let r = (i - qz_sz) / module_sz;
                let c = (j - qz_sz) / module_sz;

                // Unset modules render light
                let pixel = self.get(r as i16, c as i16).select(Luma([0]), Luma([255]));
                canvas.put_pixel(j, i, pixel);
            }
        }

        canvas
    }

    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = QUIET_ZONE * module_sz;
        let qr_sz = WIDTH * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::new();
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let r = ((i - qz_sz) / module_sz) as i16;
                let c = ((j - qz_sz) / module_sz) as i16;

                canvas.push(self.get(r, c).select(' ', '█'));
            }
            canvas.push('\n');
        }

        canvas
    }
}

#[cfg(test)]
mod render_tests {
    use crate::builder::QR;

    #[test]
    fn test_render_size_and_corners() {
        let qr = QR::template();
        let img = qr.to_image(2);
        assert_eq!(img.dimensions(), (58, 58));
        assert_eq!(img.get_pixel(0, 0).0, [255]);
        // Top left finder corner sits right after the quiet zone
        assert_eq!(img.get_pixel(8, 8).0, [0]);
        assert_eq!(img.get_pixel(9, 9).0, [0]);
        // Separator
        assert_eq!(img.get_pixel(8 + 7 * 2, 8).0, [255]);
    }

    #[test]
    fn test_to_str() {
        let qr = QR::template();
        let s = qr.to_str(1);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 29);
        assert!(lines.iter().all(|l| l.chars().count() == 29));
        assert!(lines[0].chars().all(|c| c == '█'));
        assert_eq!(lines[4].chars().nth(4), Some(' '));
        assert_eq!(lines[4].chars().nth(11), Some('█'));
    }
}
