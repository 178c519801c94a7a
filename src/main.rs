mod config;
mod quiz;

use std::sync::Arc;

use chatgpt::{client::ChatGPT, config::ChatGPTEngine};
use dotenv::dotenv;
use log::{debug, info, warn};
use quiz::{tutor::Tutor, ExamGroup, Question, QuestionBank, Scoreboard, Session, Topic};
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{ChatAction, KeyboardButton, KeyboardMarkup, ParseMode},
    utils::html,
};

use crate::config::Config;

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
type QuizStorage = Arc<ErasedStorage<State>>;

/// What a quiz run draws from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Scope {
    All,
    Exam(ExamGroup),
    Topic(Topic),
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct QuizRun {
    scope: Scope,
    session: Session,
    current: Question,
    board: Scoreboard,
}

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveModeChoice,
    ReceiveTopicChoice,
    Quiz {
        run: QuizRun,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    pretty_env_logger::init();
    let config = Config::from_env()?;
    info!("Starting stats quiz bot...");

    let bot = Bot::from_env();

    info!("Opening dialogue storage at {}", config.db_path);
    let storage: QuizStorage = SqliteStorage::open(&config.db_path, Json).await?.erase();

    let tutor = match &config.chatgpt_api_key {
        Some(key) => {
            let mut gpt = ChatGPT::new(key)?;
            gpt.config.engine = ChatGPTEngine::Gpt35Turbo;
            gpt.config.timeout = config.tutor_timeout;
            info!("Tutor enabled ({:?})", config.persona);
            Some(Arc::new(Tutor::new(gpt, config.persona)))
        }
        None => {
            info!("CHATGPT_API_KEY is not set, tutor disabled");
            None
        }
    };
    let bank = Arc::new(QuestionBank::new());

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveModeChoice].endpoint(receive_mode_choice))
            .branch(dptree::case![State::ReceiveTopicChoice].endpoint(receive_topic_choice))
            .branch(dptree::case![State::Quiz { run }].endpoint(quiz)),
    )
    .dependencies(dptree::deps![storage, bank, tutor])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    info!("Bot stopped");
    Ok(())
}

const EXAM_1: &str = "Exam 1";
const EXAM_2: &str = "Exam 2";
const ALL_TOPICS: &str = "All topics";
const PICK_TOPIC: &str = "Pick a topic";

const HINT: &str = "💡 Hint";
const SKIP: &str = "⏭ Skip";
const STOP: &str = "⏹ Stop";

const GREETING_TEXT: &str = "Hi! I'm a statistics practice bot. I'll ask you multiple-choice questions with calculator steps for every answer.";

fn mode_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(EXAM_1), KeyboardButton::new(EXAM_2)],
        vec![KeyboardButton::new(ALL_TOPICS), KeyboardButton::new(PICK_TOPIC)],
    ])
    .resize_keyboard(true)
}

fn topic_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(
        Topic::ALL
            .iter()
            .map(|topic| vec![KeyboardButton::new(topic.name())])
            .collect::<Vec<_>>(),
    )
    .resize_keyboard(true)
}

fn question_keyboard(question: &Question) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = question
        .options
        .iter()
        .map(|option| vec![KeyboardButton::new(option.clone())])
        .collect();
    rows.push(vec![
        KeyboardButton::new(HINT),
        KeyboardButton::new(SKIP),
        KeyboardButton::new(STOP),
    ]);
    KeyboardMarkup::new(rows).resize_keyboard(true)
}

async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT).await?;
    bot.send_message(msg.chat.id, "What would you like to practise?")
        .reply_markup(mode_keyboard())
        .await?;

    dialogue.update(State::ReceiveModeChoice).await?;
    Ok(())
}

async fn receive_mode_choice(
    bot: Bot,
    dialogue: QuizDialogue,
    bank: Arc<QuestionBank>,
    msg: Message,
) -> HandlerResult {
    let scope = match msg.text() {
        Some(EXAM_1) => Scope::Exam(ExamGroup::Exam1),
        Some(EXAM_2) => Scope::Exam(ExamGroup::Exam2),
        Some(ALL_TOPICS) => Scope::All,
        Some(PICK_TOPIC) => {
            bot.send_message(msg.chat.id, "Choose a topic")
                .reply_markup(topic_keyboard())
                .await?;
            dialogue.update(State::ReceiveTopicChoice).await?;
            return Ok(());
        }
        Some("/start") => return start(bot, dialogue, msg).await,
        _ => {
            bot.send_message(msg.chat.id, "Please choose one of the options")
                .reply_markup(mode_keyboard())
                .await?;
            return Ok(());
        }
    };
    begin_quiz(bot, dialogue, &bank, msg.chat.id, scope).await
}

async fn receive_topic_choice(
    bot: Bot,
    dialogue: QuizDialogue,
    bank: Arc<QuestionBank>,
    msg: Message,
) -> HandlerResult {
    match msg.text().and_then(Topic::from_name) {
        Some(topic) => begin_quiz(bot, dialogue, &bank, msg.chat.id, Scope::Topic(topic)).await,
        None => {
            bot.send_message(msg.chat.id, "Please choose a topic from the list")
                .reply_markup(topic_keyboard())
                .await?;
            Ok(())
        }
    }
}

fn next_question(
    bank: &QuestionBank,
    session: &mut Session,
    scope: Scope,
    previous: Option<&Question>,
) -> Question {
    let (topic, exam) = match scope {
        Scope::All => (None, None),
        Scope::Exam(exam) => (None, Some(exam.name())),
        Scope::Topic(topic) => (Some(topic.slug()), None),
    };
    bank.get_new_question(session, topic, exam, previous)
}

async fn begin_quiz(
    bot: Bot,
    dialogue: QuizDialogue,
    bank: &QuestionBank,
    chat_id: ChatId,
    scope: Scope,
) -> HandlerResult {
    info!("Chat {} started a quiz: {:?}", chat_id, scope);
    let mut session = Session::new();
    let current = next_question(bank, &mut session, scope, None);
    let run = QuizRun {
        scope,
        session,
        current,
        board: Scoreboard::default(),
    };

    bot.send_message(chat_id, "Let's go! Tap an answer below.").await?;
    ask(&bot, chat_id, &run.current).await?;
    dialogue.update(State::Quiz { run }).await?;
    Ok(())
}

async fn ask(bot: &Bot, chat_id: ChatId, question: &Question) -> HandlerResult {
    bot.send_message(
        chat_id,
        format!(
            "<i>{}</i>\n\n{}",
            html::escape(question.topic.name()),
            html::escape(&question.text)
        ),
    )
    .parse_mode(ParseMode::Html)
    .reply_markup(question_keyboard(question))
    .await?;
    Ok(())
}

fn feedback(question: &Question, correct: bool, earned: u32, board: &Scoreboard) -> String {
    let mut text = if correct {
        format!("✅ Correct! +{}", earned)
    } else {
        format!(
            "❌ Incorrect. The answer is <b>{}</b>.",
            html::escape(question.correct_option())
        )
    };
    text.push_str(&format!("\n\n{}", html::escape(&question.explanation)));
    if let Some(steps) = &question.extras.calculator_steps {
        text.push_str(&format!("\n\n<b>TI-84:</b> {}", html::escape(steps)));
    }
    if let Some(example) = &question.extras.example {
        text.push_str(&format!("\n\n<b>Example:</b>\n<pre>{}</pre>", html::escape(example)));
    }
    text.push_str(&format!("\n\n{}", board.score_line()));
    if let Some(streak) = board.streak_line() {
        text.push_str(&format!("  {}", streak));
    }
    text
}

async fn quiz(
    bot: Bot,
    dialogue: QuizDialogue,
    run: QuizRun,
    bank: Arc<QuestionBank>,
    tutor: Option<Arc<Tutor>>,
    msg: Message,
) -> HandlerResult {
    let QuizRun {
        scope,
        mut session,
        current,
        mut board,
    } = run;
    let chat_id = msg.chat.id;

    match msg.text() {
        Some(HINT) => {
            let hint = current
                .extras
                .hint
                .as_deref()
                .unwrap_or("No hint for this one. Re-read the question carefully!");
            bot.send_message(chat_id, format!("💡 {}", hint)).await?;
            return Ok(());
        }
        Some(STOP) | Some("/stop") => {
            info!("Chat {} stopped a quiz at {}", chat_id, board.score_line());
            bot.send_message(chat_id, format!("Quiz finished!\n{}", board.summary()))
                .reply_markup(mode_keyboard())
                .await?;
            dialogue.update(State::ReceiveModeChoice).await?;
            return Ok(());
        }
        Some("/start") => return start(bot, dialogue, msg).await,
        Some(SKIP) => {
            debug!("Chat {} skipped {}", chat_id, current.kind);
            bot.send_message(
                chat_id,
                format!(
                    "Skipped. The answer was <b>{}</b>.",
                    html::escape(current.correct_option())
                ),
            )
            .parse_mode(ParseMode::Html)
            .await?;
        }
        Some(answer) if current.options.iter().any(|o| o == answer.trim()) => {
            let correct = current.is_correct(answer);
            let earned = board.record(correct);
            bot.send_message(chat_id, feedback(&current, correct, earned, &board))
                .parse_mode(ParseMode::Html)
                .await?;

            if let (false, Some(tutor)) = (correct, &tutor) {
                // Best effort: a failed typing indicator changes nothing.
                let _ = bot.send_chat_action(chat_id, ChatAction::Typing).await;
                match tutor.explain_wrong_answer(&current, answer).await {
                    Ok(reply) => {
                        bot.send_message(chat_id, reply).await?;
                    }
                    Err(err) => warn!("Tutor failed for {}: {}", current.kind, err),
                }
            }
        }
        _ => {
            bot.send_message(chat_id, "Please tap one of the answers")
                .reply_markup(question_keyboard(&current))
                .await?;
            return Ok(());
        }
    }

    let next = next_question(&bank, &mut session, scope, Some(&current));
    ask(&bot, chat_id, &next).await?;
    dialogue
        .update(State::Quiz {
            run: QuizRun {
                scope,
                session,
                current: next,
                board,
            },
        })
        .await?;
    Ok(())
}
