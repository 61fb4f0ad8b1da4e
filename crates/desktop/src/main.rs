mod app;
mod settings;
mod tabs;
mod theme;
mod widgets;
mod workers;

use app::App;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title("Drone Detection System")
        .theme(App::theme)
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(980.0, 640.0),
            min_size: Some(iced::Size::new(720.0, 520.0)),
            ..Default::default()
        })
        .run()
}
