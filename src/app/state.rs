use crate::git::{CommitSummary, DiffSource};
use crate::ui::layout::{self, ViewLayout};

// ── Enums ──

/// Top-level display state: full-screen commit list, or diff viewport with
/// the list collapsed to a quarter of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Diff,
}

/// Whether keys navigate or type into the live filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Filter,
}

// ── App state ──

/// All mutable browser state. The commit list is immutable after startup;
/// filtering is a derived index view over it.
pub struct App {
    /// File whose history is being browsed.
    pub path: String,
    pub mode: Mode,
    pub input_mode: InputMode,

    commits: Vec<CommitSummary>,

    /// Live filter over commit subjects (case-insensitive substring).
    pub filter_query: String,
    /// Indices into `commits` matching the current filter, source order.
    filtered: Vec<usize>,

    /// Selection within the filtered view. In bounds whenever nonempty.
    pub selected: usize,

    /// Cached colorized diff for the selected commit while in Diff mode.
    pub diff: Option<String>,
    diff_lines: usize,

    /// Vertical offset within the diff viewport.
    pub scroll: u16,

    /// Last known terminal size, updated only by resize events.
    pub width: u16,
    pub height: u16,

    /// Output of the layout engine for the current size + mode. Single
    /// source of truth for both sub-views.
    pub layout: ViewLayout,

    /// Replaces all normal rendering until the next successful fetch.
    pub last_error: Option<String>,

    pub should_quit: bool,

    diff_source: Box<dyn DiffSource>,
}

impl App {
    pub fn new(path: String, commits: Vec<CommitSummary>, diff_source: Box<dyn DiffSource>) -> Self {
        let filtered = (0..commits.len()).collect();
        Self {
            path,
            mode: Mode::List,
            input_mode: InputMode::Normal,
            commits,
            filter_query: String::new(),
            filtered,
            selected: 0,
            diff: None,
            diff_lines: 0,
            scroll: 0,
            width: 0,
            height: 0,
            layout: ViewLayout::default(),
            last_error: None,
            should_quit: false,
            diff_source,
        }
    }

    // ── Derived views ──

    pub fn visible_commits(&self) -> impl Iterator<Item = &CommitSummary> {
        self.filtered.iter().map(|&i| &self.commits[i])
    }

    pub fn visible_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn selected_commit(&self) -> Option<&CommitSummary> {
        self.filtered.get(self.selected).map(|&i| &self.commits[i])
    }

    // ── Selection ──

    /// Advance the selection, clamped to the last entry. In Diff mode the
    /// viewport is a live preview, so a changed selection refetches.
    pub fn select_next(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let next = (self.selected + 1).min(self.filtered.len() - 1);
        self.select(next);
    }

    /// Retreat the selection, clamped to the first entry.
    pub fn select_prev(&mut self) {
        let prev = self.selected.saturating_sub(1);
        self.select(prev);
    }

    fn select(&mut self, index: usize) {
        if index == self.selected {
            return;
        }
        self.selected = index;
        if self.mode == Mode::Diff {
            self.fetch_diff();
        }
    }

    // ── Mode transitions ──

    /// Confirm: fetch the diff for the current selection and switch to Diff
    /// mode. On failure the error is surfaced and the mode stays List.
    pub fn open_diff(&mut self) {
        if self.mode == Mode::Diff {
            return;
        }
        if self.selected_commit().is_none() {
            return;
        }
        if self.fetch_diff() {
            self.mode = Mode::Diff;
            self.relayout();
        }
    }

    /// Back out of Diff mode, discarding the cached diff but keeping the
    /// selection. In List mode, back means quit.
    pub fn back(&mut self) {
        match self.mode {
            Mode::Diff => {
                self.mode = Mode::List;
                self.diff = None;
                self.diff_lines = 0;
                self.relayout();
            }
            Mode::List => self.should_quit = true,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Fetch the diff for the current selection. Success resets the scroll
    /// and clears any surfaced error; failure records it and changes
    /// nothing else. Returns whether the fetch succeeded.
    fn fetch_diff(&mut self) -> bool {
        let Some(commit) = self.selected_commit() else {
            return false;
        };
        let id = commit.id.clone();
        match self.diff_source.load_diff(&id, &self.path) {
            Ok(text) => {
                self.diff_lines = text.lines().count();
                self.diff = Some(text);
                self.scroll = 0;
                self.last_error = None;
                true
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                false
            }
        }
    }

    // ── Viewport scrolling ──

    /// Largest valid scroll offset for the cached diff.
    pub fn max_scroll(&self) -> u16 {
        let content = self.diff_lines.min(u16::MAX as usize) as u16;
        content.saturating_sub(self.layout.viewport)
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn jump_top(&mut self) {
        self.scroll = 0;
    }

    pub fn jump_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Scroll position as a fraction, 1.0 when everything fits.
    pub fn scroll_percent(&self) -> f64 {
        let max = self.max_scroll();
        if max == 0 {
            1.0
        } else {
            f64::from(self.scroll) / f64::from(max)
        }
    }

    // ── Filtering ──

    pub fn filter_push(&mut self, c: char) {
        self.filter_query.push(c);
        self.apply_filter();
    }

    pub fn filter_pop(&mut self) {
        self.filter_query.pop();
        self.apply_filter();
    }

    pub fn filter_clear(&mut self) {
        self.filter_query.clear();
        self.apply_filter();
    }

    /// Re-derive the filtered view and clamp the selection into it. The
    /// underlying commit list is never touched.
    fn apply_filter(&mut self) {
        let query = self.filter_query.to_lowercase();
        self.filtered = self
            .commits
            .iter()
            .enumerate()
            .filter(|(_, c)| query.is_empty() || c.subject.to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect();
        self.selected = match self.filtered.len() {
            0 => 0,
            len => self.selected.min(len - 1),
        };
    }

    // ── Geometry ──

    /// Resize event: store the new size and recompute the layout. Also run
    /// on every mode change so the layout engine stays the single source of
    /// truth for both sub-views.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout = layout::compute(self.width, self.height, self.mode);
        self.scroll = self.scroll.min(self.max_scroll());
    }
}
