use std::{
    env,
    path::PathBuf,
    thread,
    time::{
        Duration,
        Instant,
    },
};

use hanasu::{
    app::settings::SETTINGS_FILE,
    persistence::{
        get_data_file_path,
        load_json_or_default,
        save_json,
    },
    HanasuApp,
    SettingsData,
};

/// Headless runner: seed (or import) a deck, generate every missing
/// image, report, and export the result to the app data directory.
fn main() {
    let settings = load_json_or_default::<SettingsData>(SETTINGS_FILE);
    if !get_data_file_path(SETTINGS_FILE).exists() {
        if let Err(e) = save_json(&settings, SETTINGS_FILE) {
            eprintln!("Failed to write default settings: {e}");
        }
    }
    let mut app = HanasuApp::new(settings);

    if let Some(arg) = env::args().nth(1) {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            println!("Importing deck from {arg}...");
            app.import_from_url(arg);
        } else {
            println!("Importing deck from file {arg}...");
            app.import_from_file(PathBuf::from(arg));
        }
        run_until_idle(&mut app);

        if let Some(error) = app.error_message.take() {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }

    println!("Deck has {} flashcards", app.deck.len());

    let start = Instant::now();
    app.generate_all_missing();
    run_until_idle(&mut app);

    if let Some(error) = app.error_message.take() {
        eprintln!("{error}");
    }
    println!("Generation sweep finished ({:.1}s)", start.elapsed().as_secs_f32());

    if !app.deck.is_empty() {
        app.export_to(get_data_file_path("deck.json"));
        run_until_idle(&mut app);
    }
}

fn run_until_idle(app: &mut HanasuApp) {
    loop {
        app.poll_tasks();
        if let Some(status) = app.status_message.take() {
            println!("{status}");
        }
        if !app.is_busy() {
            return;
        }
        thread::sleep(Duration::from_millis(50));
    }
}
