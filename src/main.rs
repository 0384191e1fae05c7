use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;
use lexiquiz::{
    config::{Config, ConfigStore, FileConfigStore},
    import,
    play::{display_word, write_summary, Player},
    runtime::{spawn_line_reader, ChannelEventSource, FixedTicker, Runner, TickScheduler},
    store::{HistoryStore, QuizStore, WordSource},
    QuizSession, Word,
};
use rand::{rngs::StdRng, SeedableRng};
use std::{
    error::Error,
    io::{self, stdin, stdout, BufReader, Write},
    path::PathBuf,
    sync::mpsc,
    time::Duration,
};
use tracing_subscriber::EnvFilter;

const POLL_MS: u64 = 100;

/// personal bilingual dictionaries and timed vocabulary quizzes
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Cli {
    /// database file (defaults to the configured or platform location)
    #[clap(long, global = true)]
    db: Option<PathBuf>,

    /// config file
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// manage dictionaries
    Dict {
        #[clap(subcommand)]
        action: DictAction,
    },
    /// manage words in a dictionary
    Word {
        #[clap(subcommand)]
        action: WordAction,
    },
    /// import words from a CSV file (original,translations,phonetic,tags)
    Import { dictionary: String, file: PathBuf },
    /// define and run quizzes
    Quiz {
        #[clap(subcommand)]
        action: QuizAction,
    },
    /// show past quiz results, newest first
    History {
        /// only this quiz
        quiz: Option<String>,
        /// print as JSON
        #[clap(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum DictAction {
    Add {
        name: String,
        /// language of the original words
        #[clap(long, default_value = "en")]
        from: String,
        /// language of the translations
        #[clap(long)]
        to: String,
    },
    List,
    /// delete a dictionary with its words, quizzes and history
    Remove { name: String },
    /// list the tags used in a dictionary
    Tags { name: String },
}

#[derive(Subcommand, Debug)]
enum WordAction {
    Add {
        dictionary: String,
        original: String,
        /// accepted translation (repeatable)
        #[clap(short = 't', long = "translation", required = true)]
        translations: Vec<String>,
        #[clap(short = 'p', long)]
        phonetic: Option<String>,
        /// tag (repeatable)
        #[clap(long = "tag")]
        tags: Vec<String>,
    },
    List {
        dictionary: String,
        /// filter by text in the word or its translations
        #[clap(short, long)]
        search: Option<String>,
        /// only words with this tag
        #[clap(long)]
        tag: Option<String>,
    },
    Remove { id: i64 },
}

#[derive(Subcommand, Debug)]
enum QuizAction {
    Create {
        name: String,
        dictionary: String,
        /// seconds allowed per word
        #[clap(short, long)]
        seconds: Option<u32>,
        /// only quiz words with this tag
        #[clap(long)]
        tag: Option<String>,
    },
    List,
    Run {
        name: String,
        /// seed the word shuffle
        #[clap(long)]
        seed: Option<u64>,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lexiquiz=warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing();

    let config_store = match cli.config {
        Some(ref path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let config = config_store.load();

    let db_path = cli.db.clone().or_else(|| config.db_path.clone());
    let mut store = match db_path {
        Some(path) => QuizStore::open(path)?,
        None => QuizStore::open_default()?,
    };

    match cli.command {
        Command::Dict { action } => run_dict(&store, action),
        Command::Word { action } => run_word(&store, action),
        Command::Import { dictionary, file } => {
            let dict = store.find_dictionary(&dictionary)?;
            let count = import::import_file(&mut store, dict.id, &file)?;
            println!("imported {count} words into {}", dict.name);
            Ok(())
        }
        Command::Quiz { action } => run_quiz(&store, &config, action),
        Command::History { quiz, json } => run_history(&store, quiz, json),
    }
}

fn run_dict(store: &QuizStore, action: DictAction) -> Result<(), Box<dyn Error>> {
    match action {
        DictAction::Add { name, from, to } => {
            store.create_dictionary(&name, &from, &to)?;
            println!("created dictionary {name} ({from} -> {to})");
        }
        DictAction::List => {
            for dict in store.list_dictionaries()? {
                let count = store.load_words(dict.id)?.len();
                println!(
                    "{}  {} -> {}  {} words",
                    dict.name, dict.source_language, dict.target_language, count
                );
            }
        }
        DictAction::Remove { name } => {
            let dict = store.find_dictionary(&name)?;
            store.delete_dictionary(dict.id)?;
            println!("removed dictionary {name}");
        }
        DictAction::Tags { name } => {
            let dict = store.find_dictionary(&name)?;
            for tag in store.tags(dict.id)? {
                println!("{tag}");
            }
        }
    }
    Ok(())
}

fn run_word(store: &QuizStore, action: WordAction) -> Result<(), Box<dyn Error>> {
    match action {
        WordAction::Add {
            dictionary,
            original,
            translations,
            phonetic,
            tags,
        } => {
            let dict = store.find_dictionary(&dictionary)?;
            let mut word = Word::new(original, translations).with_tags(tags);
            if let Some(phonetic) = phonetic {
                word = word.with_phonetic(phonetic);
            }
            let id = store.add_word(dict.id, &word)?;
            println!("added word {id}: {}", display_word(&word));
        }
        WordAction::List {
            dictionary,
            search,
            tag,
        } => {
            let dict = store.find_dictionary(&dictionary)?;
            let words = match search {
                Some(ref query) => store.search_words(dict.id, query)?,
                None => store.load_words(dict.id)?,
            };
            for word in words
                .iter()
                .filter(|w| tag.as_deref().map_or(true, |t| w.has_tag(t)))
            {
                let tags = if word.tags.is_empty() {
                    String::new()
                } else {
                    format!("  #{}", word.tags.join(" #"))
                };
                println!(
                    "{:>4}  {} -> {}{}",
                    word.id.unwrap_or_default(),
                    display_word(word),
                    word.translations.join(", "),
                    tags
                );
            }
        }
        WordAction::Remove { id } => {
            store.delete_word(id)?;
            println!("removed word {id}");
        }
    }
    Ok(())
}

fn run_quiz(store: &QuizStore, config: &Config, action: QuizAction) -> Result<(), Box<dyn Error>> {
    match action {
        QuizAction::Create {
            name,
            dictionary,
            seconds,
            tag,
        } => {
            let dict = store.find_dictionary(&dictionary)?;
            let seconds = seconds.unwrap_or(config.seconds_per_word);
            store.create_quiz(&name, dict.id, seconds, tag.as_deref())?;
            println!("created quiz {name} over {} ({seconds}s per word)", dict.name);
        }
        QuizAction::List => {
            for quiz in store.list_quizzes()? {
                let tag = quiz.tag.map(|t| format!("  #{t}")).unwrap_or_default();
                println!("{}  {}s per word{}", quiz.name, quiz.seconds_per_word, tag);
            }
        }
        QuizAction::Run { name, seed } => {
            let quiz = store.find_quiz(&name)?;
            let definition = store.load_definition(&quiz)?;

            let session = match seed {
                Some(seed) => QuizSession::with_rng(StdRng::seed_from_u64(seed)),
                None => QuizSession::new(),
            };
            let mut session = session.with_policy(config.answer_policy());

            let (tx, rx) = mpsc::channel();
            spawn_line_reader(BufReader::new(stdin()), tx.clone());
            let scheduler = TickScheduler::new(FixedTicker::new(config.tick_interval()), tx);
            let runner = Runner::new(
                ChannelEventSource::new(rx),
                Duration::from_millis(POLL_MS),
            );
            let out = stdout();
            let styled = out.is_tty();
            let mut player = Player::new(runner, scheduler, out.lock()).styled(styled);

            if let Some(result) = player.play(&mut session, &definition)? {
                store.save_result(definition.quiz_id.unwrap_or(quiz.id), &result)?;
            }
        }
    }
    Ok(())
}

fn run_history(store: &QuizStore, quiz: Option<String>, json: bool) -> Result<(), Box<dyn Error>> {
    let quizzes = store.list_quizzes()?;
    let quiz_id = match quiz {
        Some(ref name) => Some(store.find_quiz(name)?.id),
        None => None,
    };
    let entries = store.history(quiz_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let mut out = stdout().lock();
    for entry in entries {
        let name = quizzes
            .iter()
            .find(|q| q.id == entry.quiz_id)
            .map(|q| q.name.as_str())
            .unwrap_or("?");
        writeln!(out, "{}  {}", entry.taken_at.format("%Y-%m-%d %H:%M"), name)?;
        write_summary(&mut out, &entry.result())?;
    }
    Ok(())
}
