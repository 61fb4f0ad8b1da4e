use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, TryRecvError};
use iced::widget::{button, column, container, image, row, scrollable, text};
use iced::{window, Element, Event, Length, Subscription, Task, Theme};

use drone_detect_core::intake::domain::image_upload::ImageUpload;
use drone_detect_core::intake::domain::preview::Preview;
use drone_detect_core::session::session_state::SessionState;
use drone_detect_core::shared::constants::IMAGE_EXTENSIONS;

use crate::settings::{Appearance, Settings};
use crate::tabs;
use crate::tabs::main_tab::MainView;
use crate::theme;
use crate::widgets::image_viewport::Viewport;
use crate::workers::decode_worker::{self, DecodeMessage};
use crate::workers::detect_worker::{self, DetectMessage, DetectParams};

const WORKER_POLL_INTERVAL: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// Tab enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Main,
    Settings,
    Appearance,
    About,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Main, Tab::Settings, Tab::Appearance, Tab::About];

    fn label(self) -> &'static str {
        match self {
            Tab::Main => "Detect",
            Tab::Settings => "Settings",
            Tab::Appearance => "Appearance",
            Tab::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    SelectInput,
    InputSelected(Option<PathBuf>),
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    DropZoneHover(bool),
    DetectHover(bool),
    RunDetection,
    PollWorkers,
    EndpointChanged(String),
    TimeoutChanged(u32),
    RestoreDefaults,
    AppearanceChanged(Appearance),
    HighContrastChanged(bool),
    FontScaleChanged(f32),
    PollSystemTheme,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    active_tab: Tab,
    pub settings: Settings,
    session: SessionState,
    preview_handle: Option<image::Handle>,
    decode_workers: Vec<Receiver<DecodeMessage>>,
    detect_workers: Vec<Receiver<DetectMessage>>,
    drop_zone_hovered: bool,
    detect_hovered: bool,
    started: Instant,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        (
            Self {
                active_tab: Tab::Main,
                settings: Settings::load(),
                session: SessionState::new(),
                preview_handle: None,
                decode_workers: Vec::new(),
                detect_workers: Vec::new(),
                drop_zone_hovered: false,
                detect_hovered: false,
                started: Instant::now(),
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
            }
            Message::SelectInput => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select an image")
                            .add_filter("Images", IMAGE_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::InputSelected,
                );
            }
            Message::InputSelected(Some(path)) => {
                self.select(path);
            }
            Message::InputSelected(None) => {}
            Message::FileHovered => {
                self.session.drag_entered();
            }
            Message::FilesHoveredLeft => {
                self.session.drag_left();
            }
            Message::FileDropped(path) => {
                self.session.drag_left();
                self.active_tab = Tab::Main;
                self.select(path);
            }
            Message::DropZoneHover(hovered) => {
                self.drop_zone_hovered = hovered;
            }
            Message::DetectHover(hovered) => {
                self.detect_hovered = hovered;
            }
            Message::RunDetection => match self.session.begin_detection() {
                Ok(job) => {
                    self.detect_workers.push(detect_worker::spawn(DetectParams {
                        job,
                        endpoint: self.settings.effective_endpoint(),
                        timeout: self.settings.timeout(),
                    }));
                }
                Err(e) => log::warn!("Detection not started: {e}"),
            },
            Message::PollWorkers => {
                self.poll_workers();
            }
            Message::EndpointChanged(endpoint) => {
                self.settings.endpoint = endpoint;
                self.settings.save();
            }
            Message::TimeoutChanged(secs) => {
                self.settings.timeout_secs = secs;
                self.settings.save();
            }
            Message::RestoreDefaults => {
                let defaults = Settings::default();
                self.settings.endpoint = defaults.endpoint;
                self.settings.timeout_secs = defaults.timeout_secs;
                self.settings.save();
            }
            Message::AppearanceChanged(appearance) => {
                self.settings.appearance = appearance;
                self.settings.save();
            }
            Message::HighContrastChanged(enabled) => {
                self.settings.high_contrast = enabled;
                self.settings.save();
            }
            Message::FontScaleChanged(scale) => {
                self.settings.font_scale = scale;
                self.settings.save();
            }
            Message::PollSystemTheme => {
                // Theme is resolved fresh in theme() on every render,
                // so just requesting a redraw is enough.
            }
        }
        Task::none()
    }

    fn select(&mut self, path: PathBuf) {
        let candidate = ImageUpload::accept(&path);
        if let Some(job) = self.session.select_file(candidate) {
            self.decode_workers.push(decode_worker::spawn(job));
        }
        if self.session.preview().is_none() {
            self.preview_handle = None;
        }
    }

    fn poll_workers(&mut self) {
        for msg in drain(&mut self.decode_workers) {
            if self.session.preview_decoded(msg.token, msg.result) {
                self.preview_handle = self.session.preview().map(to_handle);
            }
        }
        for msg in drain(&mut self.detect_workers) {
            if self.session.detection_finished(msg.token, msg.result) {
                log::info!(
                    "Showing {} detection(s)",
                    self.session.detections().len()
                );
            }
        }
    }

    fn has_pending_work(&self) -> bool {
        !self.decode_workers.is_empty() || !self.detect_workers.is_empty()
    }

    /// Sine wave in 0..1 that drives the loading veil.
    fn pulse(&self) -> f32 {
        let t = self.started.elapsed().as_secs_f32();
        ((t * std::f32::consts::PI).sin() + 1.0) / 2.0
    }

    pub fn view(&self) -> Element<'_, Message> {
        let fs = self.settings.font_scale;
        let theme = self.theme();

        let tab_bar = row(Tab::ALL
            .iter()
            .map(|&tab| {
                let label = text(tab.label()).size(scaled(13.0, fs));
                let btn = button(label)
                    .on_press(Message::TabSelected(tab))
                    .padding([6, 14]);
                if tab == self.active_tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::text).into()
                }
            })
            .collect::<Vec<_>>())
        .spacing(2);

        let content: Element<'_, Message> = match self.active_tab {
            Tab::Main => tabs::main_tab::view(fs, &theme, self.main_view()),
            Tab::Settings => tabs::settings_tab::view(&self.settings, &theme),
            Tab::Appearance => tabs::appearance_tab::view(&self.settings, &theme),
            Tab::About => tabs::about_tab::view(fs, &self.settings.effective_endpoint()),
        };

        let tab_content = container(scrollable(content).height(Length::Fill))
            .padding(16)
            .height(Length::Fill);

        column![tab_bar, tab_content]
            .spacing(0)
            .height(Length::Fill)
            .into()
    }

    fn main_view(&self) -> MainView<'_> {
        MainView {
            selected_name: self.session.selected_image().map(|i| i.file_name()),
            drop_highlighted: self.session.is_drag_active() || self.drop_zone_hovered,
            can_detect: self.session.can_detect(),
            loading: self.session.is_loading(),
            error: self.session.error(),
            detect_hovered: self.detect_hovered,
            viewport: Viewport {
                handle: self.preview_handle.as_ref(),
                boxes: self.session.overlay(),
                aspect_ratio: self.session.aspect_ratio(),
                loading: self.session.is_loading(),
                pulse: self.pulse(),
            },
        }
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance, self.settings.high_contrast)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![iced::event::listen_with(file_drop_events)];
        if self.has_pending_work() {
            subs.push(iced::time::every(WORKER_POLL_INTERVAL).map(|_| Message::PollWorkers));
        }
        if self.settings.appearance == Appearance::System {
            subs.push(iced::time::every(Duration::from_secs(2)).map(|_| Message::PollSystemTheme));
        }
        Subscription::batch(subs)
    }
}

fn file_drop_events(event: Event, _status: iced::event::Status, _id: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
        Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    }
}

/// Takes every ready message and forgets workers that are done or gone.
fn drain<T>(workers: &mut Vec<Receiver<T>>) -> Vec<T> {
    let mut ready = Vec::new();
    workers.retain(|rx| match rx.try_recv() {
        Ok(msg) => {
            ready.push(msg);
            false
        }
        Err(TryRecvError::Empty) => true,
        Err(TryRecvError::Disconnected) => false,
    });
    ready
}

fn to_handle(preview: &Preview) -> image::Handle {
    image::Handle::from_rgba(preview.width(), preview.height(), preview.pixels().to_vec())
}

/// Scale a base font size by the user's font_scale setting.
pub fn scaled(base: f32, font_scale: f32) -> f32 {
    (base * font_scale).round()
}
