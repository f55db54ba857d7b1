//! Lab session application: side-by-side panes, overlays and the event loop

mod render;

pub use render::AppLayout;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::DefaultTerminal;
use std::path::PathBuf;

use crate::config::Config;
use crate::input::{Action, KeyContext, KeybindingResolver};
use crate::services::{
    AsciinemaRecorder, GitCli, LabPaths, LabWorkspace, LintTool, SessionRecorder,
    ShellcheckLint, VersionControl,
};
use crate::view::controls::{EditOutcome, FocusState, TextAreaState};
use crate::view::file_viewer::{FileViewer, ScrollDirection};
use crate::view::theme::Theme;

/// Which part of the UI owns the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Panes,
    LintResults,
    CommitMessage,
}

/// What the event loop does after a key has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Hand the terminal to the session recorder
    Suspend,
    Quit,
}

/// External tools the application drives
pub struct Services {
    pub lint: Box<dyn LintTool>,
    pub recorder: Box<dyn SessionRecorder>,
    pub vcs: Box<dyn VersionControl>,
}

impl Services {
    /// Process-backed tools as named in the config
    pub fn from_config(config: &Config, workspace: &LabWorkspace) -> Self {
        Self {
            lint: Box::new(ShellcheckLint::new(config.lab.lint_command.clone())),
            recorder: Box::new(AsciinemaRecorder::new(config.lab.recorder_command.clone())),
            vcs: Box::new(GitCli::new(workspace.root())),
        }
    }
}

/// The running application
pub struct App {
    workspace: LabWorkspace,
    lab: LabPaths,
    lint_results_path: PathBuf,
    script: FileViewer,
    requirement: FileViewer,
    lint_results: FileViewer,
    commit: TextAreaState,
    mode: Mode,
    status: String,
    theme: Theme,
    keybindings: KeybindingResolver,
    services: Services,
}

impl App {
    /// Build the application for `lab`, sized for a terminal of `area`
    pub fn new(
        config: &Config,
        workspace: LabWorkspace,
        lab: &str,
        services: Services,
        area: Rect,
    ) -> Self {
        let layout = AppLayout::new(area);
        let (script_w, script_h) = rect_size(layout.shell_inner());
        let (req_w, req_h) = rect_size(layout.demand_inner());
        let (lint_w, lint_h) = rect_size(layout.overlay_inner());
        let (commit_w, commit_h) = rect_size(layout.commit_text());

        let mut app = Self {
            lab: workspace.lab(lab),
            workspace,
            lint_results_path: config.lab.lint_results_path.clone(),
            script: FileViewer::new(script_w, script_h),
            requirement: FileViewer::new(req_w, req_h),
            lint_results: FileViewer::new(lint_w, lint_h),
            commit: TextAreaState::new(commit_w, commit_h),
            mode: Mode::Panes,
            status: String::new(),
            theme: Theme::from_config(&config.theme),
            keybindings: KeybindingResolver::new(config),
            services,
        };

        let pulled = if app.workspace.root().join(".git").exists() {
            app.services.vcs.pull()
        } else {
            Ok(())
        };
        app.load_lab();
        if let Err(e) = pulled {
            tracing::warn!("app: pull failed: {:#}", e);
            app.status = format!("Pull failed: {e:#}");
        }
        app
    }

    pub fn lab(&self) -> &LabPaths {
        &self.lab
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn script(&self) -> &FileViewer {
        &self.script
    }

    pub fn requirement(&self) -> &FileViewer {
        &self.requirement
    }

    pub fn lint_results(&self) -> &FileViewer {
        &self.lint_results
    }

    pub fn commit(&self) -> &TextAreaState {
        &self.commit
    }

    /// Re-fit every view to a new terminal size
    pub fn resize(&mut self, area: Rect) {
        let layout = AppLayout::new(area);
        let (w, h) = rect_size(layout.shell_inner());
        self.script.resize(w, h);
        let (w, h) = rect_size(layout.demand_inner());
        self.requirement.resize(w, h);
        let (w, h) = rect_size(layout.overlay_inner());
        self.lint_results.resize(w, h);
        let (w, h) = rect_size(layout.commit_text());
        self.commit.resize(w, h);
    }

    /// Context used to resolve the next key
    pub fn key_context(&self) -> KeyContext {
        match self.mode {
            Mode::Panes => KeyContext::Panes,
            Mode::LintResults => KeyContext::LintResults,
            Mode::CommitMessage => match self.commit.focus {
                FocusState::Focused => KeyContext::CommitInput,
                FocusState::Normal => KeyContext::CommitButton,
            },
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Flow {
        let action = self.keybindings.resolve(key, self.key_context());
        self.apply_action(action)
    }

    pub fn apply_action(&mut self, action: Action) -> Flow {
        tracing::trace!(?action, mode = ?self.mode, "app: action");
        match self.mode {
            Mode::Panes => return self.apply_pane_action(action),
            Mode::LintResults => {
                if let Some(direction) = action.scroll_direction() {
                    self.lint_results.scroll(direction);
                } else if action == Action::Quit {
                    self.mode = Mode::Panes;
                }
            }
            Mode::CommitMessage => {
                if let Some(command) = action.edit_command() {
                    match self.commit.apply(command) {
                        EditOutcome::Continue => {}
                        EditOutcome::Submitted(message) => {
                            self.mode = Mode::Panes;
                            self.commit_changes(&message);
                        }
                        EditOutcome::Cancelled => {
                            self.mode = Mode::Panes;
                            self.status = "Commit cancelled".to_string();
                        }
                    }
                }
            }
        }
        Flow::Continue
    }

    fn apply_pane_action(&mut self, action: Action) -> Flow {
        if let Some(direction) = action.scroll_direction() {
            self.scroll_panes(direction);
            return Flow::Continue;
        }
        match action {
            Action::RunLint => self.run_lint(),
            Action::OpenCommit => {
                self.commit.clear();
                self.mode = Mode::CommitMessage;
            }
            Action::RecordSession => return Flow::Suspend,
            Action::NextLab => self.next_lab(),
            Action::Push => self.push(),
            Action::Reload => self.reload(),
            Action::Quit => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }

    fn scroll_panes(&mut self, direction: ScrollDirection) {
        self.script.scroll(direction);
        self.requirement.scroll(direction);
    }

    /// Show the current lab's script and requirement from the top
    fn load_lab(&mut self) {
        let mut errors = Vec::new();
        if let Err(e) = self.script.load(&self.lab.script) {
            errors.push(e.to_string());
        }
        if let Err(e) = self.requirement.load(&self.lab.requirement) {
            errors.push(e.to_string());
        }
        if errors.is_empty() {
            self.status = format!("Lab {}", self.lab.name);
        } else {
            tracing::warn!(lab = %self.lab.name, ?errors, "app: failed to load lab files");
            self.status = errors.join("; ");
        }
    }

    fn next_lab(&mut self) {
        let Some(next) = self.workspace.next_lab(&self.lab.name) else {
            self.status = "No labs listed".to_string();
            return;
        };
        self.lab = self.workspace.lab(next);
        tracing::debug!(lab = %self.lab.name, "app: switched lab");
        self.load_lab();
    }

    /// Re-read both panes, keeping their scroll positions
    pub fn reload(&mut self) {
        let result = self.script.reload().and(self.requirement.reload());
        match result {
            Ok(()) => self.status = format!("Reloaded {}", self.lab.name),
            Err(e) => {
                tracing::warn!("app: reload failed: {}", e);
                self.status = e.to_string();
            }
        }
    }

    /// Lint the script and open the results overlay, keeping its scroll
    /// position across runs
    pub fn run_lint(&mut self) {
        if let Err(e) = self
            .services
            .lint
            .run(&self.lab.script, &self.lint_results_path)
        {
            tracing::warn!("app: lint failed: {:#}", e);
            self.status = format!("Lint failed: {e:#}");
            return;
        }
        let shown = if self.lint_results.path() == Some(self.lint_results_path.as_path()) {
            self.lint_results.reload()
        } else {
            self.lint_results.load(&self.lint_results_path)
        };
        match shown {
            Ok(()) => {
                self.mode = Mode::LintResults;
                self.status = format!("Lint results for {}", self.lab.name);
            }
            Err(e) => {
                tracing::warn!("app: cannot show lint results: {}", e);
                self.status = e.to_string();
            }
        }
    }

    /// Record the student editing the script; the caller releases the terminal
    pub fn record_session(&mut self) {
        let result = self.services.recorder.record(
            &self.workspace.student.editor,
            &self.lab.script,
            &self.lab.recording,
        );
        match result {
            Ok(()) => {
                self.status = format!("Recorded {}", self.lab.recording.display());
                if let Err(e) = self.script.reload() {
                    self.status = e.to_string();
                }
            }
            Err(e) => {
                tracing::warn!("app: recording failed: {:#}", e);
                self.status = format!("Recording failed: {e:#}");
            }
        }
    }

    fn commit_changes(&mut self, message: &str) {
        let vcs = &self.services.vcs;
        let result = vcs.add_all().and_then(|()| vcs.commit(message));
        match result {
            Ok(()) => self.status = "Committed".to_string(),
            Err(e) => {
                tracing::warn!("app: commit failed: {:#}", e);
                self.status = format!("Commit failed: {e:#}");
            }
        }
    }

    fn push(&mut self) {
        match self.services.vcs.push() {
            Ok(()) => self.status = "Pushed".to_string(),
            Err(e) => {
                tracing::warn!("app: push failed: {:#}", e);
                self.status = format!("Push failed: {e:#}");
            }
        }
    }

    /// Draw, wait for one event, handle it; until the user quits
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match self.handle_key(&key) {
                        Flow::Continue => {}
                        Flow::Quit => break,
                        Flow::Suspend => {
                            ratatui::restore();
                            self.record_session();
                            terminal = ratatui::try_init()?;
                            let size = terminal.size()?;
                            self.resize(Rect::new(0, 0, size.width, size.height));
                        }
                    }
                }
                Event::Resize(width, height) => self.resize(Rect::new(0, 0, width, height)),
                _ => {}
            }
        }
        Ok(())
    }
}

fn rect_size(rect: Rect) -> (usize, usize) {
    (usize::from(rect.width), usize::from(rect.height))
}
