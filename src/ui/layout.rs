use crate::app::Mode;

/// One-line title/rule bar above the diff viewport.
pub const HEADER_HEIGHT: u16 = 1;
/// One-line scroll-percentage bar below the diff viewport.
pub const FOOTER_HEIGHT: u16 = 1;

/// Concrete row heights for the current frame. Both sub-views consume this
/// value; nothing else derives geometry from the raw terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewLayout {
    pub width: u16,
    pub header: u16,
    pub footer: u16,
    pub list: u16,
    pub viewport: u16,
}

/// Pure geometry: terminal size + mode in, row heights out. Idempotent, no
/// hidden state, never negative — tiny terminals clamp to zero rows.
pub fn compute(width: u16, height: u16, mode: Mode) -> ViewLayout {
    match mode {
        Mode::List => ViewLayout {
            width,
            header: 0,
            footer: 0,
            list: height,
            viewport: 0,
        },
        Mode::Diff => {
            let list = height / 4;
            let viewport = height.saturating_sub(list + HEADER_HEIGHT + FOOTER_HEIGHT);
            ViewLayout {
                width,
                header: HEADER_HEIGHT,
                footer: FOOTER_HEIGHT,
                list,
                viewport,
            }
        }
    }
}
