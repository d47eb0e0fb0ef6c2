pub mod config_ops;
pub mod convert_ops;
pub mod table_ops;

use unicode_width::UnicodeWidthStr;

/// Left-align `s` to `width` terminal columns. Kana are double width.
pub(crate) fn pad(s: &str, width: usize) -> String {
    let w = s.width();
    let mut out = String::from(s);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(w)));
    out
}

pub(crate) fn column_width<'a>(cells: impl Iterator<Item = &'a str>, min: usize) -> usize {
    cells.map(UnicodeWidthStr::width).fold(min, usize::max)
}

pub(crate) fn hex_codes(codes: &[u16]) -> String {
    codes
        .iter()
        .map(|c| {
            if *c < 0x100 {
                format!("{c:02X}")
            } else {
                format!("{c:04X}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_counts_wide_chars() {
        assert_eq!(pad("か", 4), "か  ");
        assert_eq!(pad("ka", 4), "ka  ");
        assert_eq!(pad("きゃあ", 2), "きゃあ");
    }

    #[test]
    fn column_width_takes_max() {
        let cells = ["a", "きゃ", "abc"];
        assert_eq!(column_width(cells.iter().copied(), 2), 4);
        assert_eq!(column_width(std::iter::empty(), 3), 3);
    }

    #[test]
    fn hex_codes_split_by_width() {
        assert_eq!(hex_codes(&[0x82A9, 0x6B]), "82A9 6B");
        assert_eq!(hex_codes(&[]), "");
    }
}
