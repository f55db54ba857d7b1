use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};
use ratatui::Frame;

use super::{App, Mode};
use crate::view::controls::FocusState;
use crate::view::terminal_surface::BufferSurface;

const BUTTON_BAR: &str =
    " c Lint | g Commit | s Record | l Next lab | p Push | r Reload | q Quit ";
const COMMIT_BUTTON: &str = "[ Commit ]";

/// Screen areas of the application for one terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Script pane, including its border
    pub shell: Rect,
    /// Requirement pane, including its border
    pub demand: Rect,
    pub buttons: Rect,
    pub status: Rect,
    /// Centered box for the lint results and commit message
    pub overlay: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let [main, buttons, status] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let [shell, demand] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(main);

        let width = area.width - area.width / 5;
        let height = area.height - area.height / 5;
        let overlay = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        Self {
            shell,
            demand,
            buttons,
            status,
            overlay,
        }
    }

    pub fn shell_inner(&self) -> Rect {
        Block::bordered().inner(self.shell)
    }

    pub fn demand_inner(&self) -> Rect {
        Block::bordered().inner(self.demand)
    }

    pub fn overlay_inner(&self) -> Rect {
        Block::bordered().inner(self.overlay)
    }

    /// Commit message text, above a spacer row and the button row
    pub fn commit_text(&self) -> Rect {
        self.commit_rows()[0]
    }

    pub fn commit_button(&self) -> Rect {
        self.commit_rows()[2]
    }

    fn commit_rows(&self) -> [Rect; 3] {
        Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(self.overlay_inner())
    }
}

impl App {
    /// Render the application to the terminal
    pub fn render(&self, frame: &mut Frame) {
        let _span = tracing::trace_span!("render").entered();
        let layout = AppLayout::new(frame.area());
        let buf = frame.buffer_mut();

        Block::bordered()
            .title(format!(" Shell: {} ", self.lab.name))
            .render(layout.shell, buf);
        self.script
            .render(&mut BufferSurface::new(buf, layout.shell_inner(), &self.theme));

        Block::bordered()
            .title(" Demand ")
            .render(layout.demand, buf);
        self.requirement
            .render(&mut BufferSurface::new(buf, layout.demand_inner(), &self.theme));

        Paragraph::new(BUTTON_BAR)
            .style(Style::default().add_modifier(Modifier::REVERSED))
            .render(layout.buttons, buf);
        Paragraph::new(self.status.as_str()).render(layout.status, buf);

        let mut cursor = None;
        match self.mode {
            Mode::Panes => {}
            Mode::LintResults => {
                Clear.render(layout.overlay, buf);
                Block::bordered()
                    .title(" Lint results ")
                    .render(layout.overlay, buf);
                self.lint_results
                    .render(&mut BufferSurface::new(buf, layout.overlay_inner(), &self.theme));
            }
            Mode::CommitMessage => {
                Clear.render(layout.overlay, buf);
                Block::bordered()
                    .title(" Commit message ")
                    .render(layout.overlay, buf);

                let mut surface = BufferSurface::new(buf, layout.commit_text(), &self.theme);
                self.commit.render(&mut surface);
                cursor = surface.cursor_position();

                let button_style = match self.commit.focus {
                    FocusState::Normal => Style::default().add_modifier(Modifier::REVERSED),
                    FocusState::Focused => Style::default(),
                };
                Paragraph::new(COMMIT_BUTTON)
                    .style(button_style)
                    .centered()
                    .render(layout.commit_button(), buf);
            }
        }

        if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }
    }
}
