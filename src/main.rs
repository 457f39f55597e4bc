use std::fs::File;
use std::io::{stdin, BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skin_risk_survey::{
    AnswerSet, Assessment, Error, Step, SurveySession, SurveyState, ENGINE, QUESTIONS,
};

#[derive(Parser)]
#[command(about = "Skin cancer risk survey")]
struct Args {
    /// Score a JSON file of answers ({"q1": "Never", ...}) instead of asking
    #[arg(long)]
    answers: Option<PathBuf>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let assessment = match args.answers {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            let answers: AnswerSet = serde_json::from_reader(reader)?;
            scored(&answers)?
        }
        None => ask(stdin().lock())?,
    };
    let Some(assessment) = assessment else {
        println!("No questions answered, nothing to score.");
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        print_assessment(&assessment);
    }
    Ok(())
}

/// Assessment of `answers`, or `None` when nothing was answered.
fn scored(answers: &AnswerSet) -> Result<Option<Assessment<'static>>, Error> {
    if answers.is_empty() {
        return Ok(None);
    }
    ENGINE.assess(answers).map(Some)
}

fn ask(mut input: impl BufRead) -> Result<Option<Assessment<'static>>, Error> {
    let mut buffer = String::new();
    let mut session = SurveySession::new(&ENGINE);

    println!("{}", QUESTIONS.title);
    println!("Answer with a number or the option text, \"b\" goes back.");
    println!();
    while let Some(question) = session.current() {
        let (position, total) = session.progress();
        println!("Question {} of {}", position, total);
        println!("{}", question.prompt);
        for (index, option) in question.options.iter().enumerate() {
            let marker = if session.current_answer() == Some(option.as_str()) {
                "*"
            } else {
                " "
            };
            println!(" {}{} => {}", marker, index + 1, option);
        }

        buffer.clear();
        if input.read_line(&mut buffer)? == 0 {
            break;
        }
        let input = buffer.trim();
        if input == "b" {
            if !session.previous() {
                println!("Already at the first question.");
            }
            println!();
            continue;
        }
        match store_answer(input, &mut session) {
            Ok(Step::Next(_)) => println!(),
            Ok(Step::End) => break,
            Err(_) => println!("Answer with a number 1-5 or one of the options shown."),
        }
    }
    println!();
    if session.state() == SurveyState::NotStarted {
        return Ok(None);
    }
    session.finish().map(Some)
}

fn store_answer(value: &str, session: &mut SurveySession) -> Result<Step, Error> {
    match value.parse::<usize>() {
        Ok(number) if number >= 1 => session.answer_index(number - 1),
        _ => session.answer(value),
    }
}

fn print_assessment(assessment: &Assessment) {
    let content = assessment.classification.content;
    println!("{} {}", content.icon, content.label);
    println!(
        "Your score: {} out of {} points",
        assessment.score.total_score, assessment.max_score
    );
    if assessment.score.answered < ENGINE.len() {
        println!(
            "({} of {} questions answered)",
            assessment.score.answered,
            ENGINE.len()
        );
    }
    println!();
    println!("{}", content.title);
    println!("{}", content.description);
    println!();
    println!("Recommendations:");
    for recommendation in &content.recommendations {
        println!("  • {}", recommendation);
    }
    if let Some(ref footer) = content.footer {
        println!();
        println!("{}", footer);
    }
}
