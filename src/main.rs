use std::io::{self, BufRead, Write};
use std::time::Instant;

use log::{info, warn};
use secretnumber::events::{Channel, EventEmitter};
use secretnumber::game::narration;
use secretnumber::game::{
    Collaborators, GameController, JsonFileRecordStorage, Narrator, RandomDraw, RecordStore,
    Settings,
};
use secretnumber::model::{GameCommand, GameEvent, SettingsChange, StatusProjection};

struct StdoutNarrator;

impl Narrator for StdoutNarrator {
    fn announce(&self, text: &str) {
        println!("{}", text);
    }
}

fn init_logging() {
    env_logger::init();
}

fn print_help() {
    println!("Type a number to guess. Other commands:");
    println!("  restart | difficulty <easy|medium|hard> | mode <classic|speedrun>");
    println!("  voice <on|off> | history | help | quit");
}

fn parse_switch(word: &str) -> Option<bool> {
    match word {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

fn parse_command(line: &str) -> Option<GameCommand> {
    let mut words = line.split_whitespace();
    let command = match words.next() {
        Some("restart") => GameCommand::Restart,
        Some("difficulty") => GameCommand::ChangeDifficulty(words.next()?.parse().ok()?),
        Some("mode") => GameCommand::ChangeMode(words.next()?.parse().ok()?),
        Some("voice") => GameCommand::ChangeSettings(SettingsChange {
            voice_enabled: Some(parse_switch(words.next()?)?),
            ..Default::default()
        }),
        _ => GameCommand::SubmitGuess(line.to_string()),
    };
    Some(command)
}

fn send(emitter: &EventEmitter<GameCommand>, command: GameCommand) {
    emitter.emit(command);
}

fn main() {
    init_logging();

    let settings = Settings::load();
    let records = match Settings::data_dir() {
        Some(dir) => RecordStore::new(Box::new(JsonFileRecordStorage::open(
            &dir.join("records.json"),
        ))),
        None => {
            warn!("No data directory; records will not survive this session");
            RecordStore::in_memory()
        }
    };

    let (command_emitter, command_observer) = Channel::<GameCommand>::new();
    let (event_emitter, event_observer) = Channel::<GameEvent>::new();

    let status = StatusProjection::new();
    let _status_subscription = event_observer.subscribe_component(status.clone());
    let _settings_subscription = event_observer.subscribe(|event| {
        if let GameEvent::SettingsChanged(settings) = event {
            if let Err(e) = settings.save() {
                warn!("Could not save settings: {}", e);
            }
        }
    });
    let _feedback_subscription = event_observer.subscribe(|event| match event {
        GameEvent::GuessFeedback { entry, .. } => {
            println!("  {}", narration::history_line(entry));
        }
        GameEvent::RoundWon { is_new_record: true, .. } => println!("  New record!"),
        GameEvent::RoundRefused { reason } => println!("  Cannot start: {}", reason),
        _ => (),
    });

    let controller = GameController::wired(
        settings,
        Box::new(RandomDraw::new(Settings::seed_from_env())),
        records,
        Collaborators::default().with_narrator(Box::new(StdoutNarrator)),
        event_emitter,
        command_observer,
    );

    println!("{}", narration::TITLE);
    print_help();
    send(&command_emitter, GameCommand::NewRound);

    let stdin = io::stdin();
    let mut last_tick = Instant::now();
    loop {
        {
            let status = status.borrow();
            print!(
                "[{}..{}] attempt {} | {} | best {} > ",
                status.hint_min,
                status.hint_max,
                status.attempts,
                status.elapsed_display(),
                narration::record_summary(status.best.as_ref())
            );
        }
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => (),
        }

        let now = Instant::now();
        let epoch = controller.borrow().timer_epoch();
        if let Some(epoch) = epoch {
            send(
                &command_emitter,
                GameCommand::Tick {
                    epoch,
                    delta: now - last_tick,
                },
            );
        }
        last_tick = now;

        let line = line.trim();
        match line {
            "quit" | "exit" => break,
            "help" => print_help(),
            "history" => {
                for entry in controller.borrow().history() {
                    println!("  {}", narration::history_line(entry));
                }
            }
            _ => match parse_command(line) {
                Some(command) => send(&command_emitter, command),
                None => print_help(),
            },
        }
    }

    info!("Bye");
}
