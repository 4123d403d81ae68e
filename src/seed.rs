// src/seed.rs

use sqlx::SqlitePool;

use crate::models::question::{Difficulty, Question};

struct SampleQuiz {
    title: &'static str,
    time_limit_minutes: i64,
    questions: &'static [SampleQuestion],
}

/// (prompt, options, correct option, difficulty, points)
type SampleQuestion = (&'static str, [&'static str; 4], &'static str, Difficulty, i64);

const SAMPLE_QUIZZES: &[SampleQuiz] = &[
    SampleQuiz {
        title: "Rust Fundamentals",
        time_limit_minutes: 15,
        questions: &[
            (
                "Which keyword declares a function?",
                ["fn", "func", "def", "function"],
                "fn",
                Difficulty::Easy,
                2,
            ),
            (
                "Which macro prints a line to stdout?",
                ["print!", "println!", "echo!", "write!"],
                "println!",
                Difficulty::Easy,
                2,
            ),
            (
                "What is the default integer type?",
                ["i64", "isize", "i32", "u32"],
                "i32",
                Difficulty::Easy,
                2,
            ),
            (
                "Which keyword makes a binding mutable?",
                ["var", "mut", "let", "ref"],
                "mut",
                Difficulty::Easy,
                2,
            ),
            (
                "Which tool builds and runs Rust projects?",
                ["rustup", "cargo", "rustc", "clippy"],
                "cargo",
                Difficulty::Easy,
                2,
            ),
            (
                "What does `?` do on an Err value?",
                ["Panics", "Returns it early", "Ignores it", "Logs it"],
                "Returns it early",
                Difficulty::Medium,
                3,
            ),
            (
                "Which trait enables `{}` formatting?",
                ["Debug", "Display", "ToString", "Format"],
                "Display",
                Difficulty::Medium,
                3,
            ),
            (
                "What is the type of a string literal?",
                ["String", "&'static str", "&String", "str"],
                "&'static str",
                Difficulty::Medium,
                3,
            ),
            (
                "Which type gives shared ownership across threads?",
                ["Rc", "Box", "Arc", "Cell"],
                "Arc",
                Difficulty::Medium,
                3,
            ),
            (
                "Which trait is needed to use a type as a HashMap key?",
                ["Ord", "Hash", "Clone", "Default"],
                "Hash",
                Difficulty::Medium,
                3,
            ),
            (
                "What does `Send` guarantee?",
                [
                    "Safe to share by reference",
                    "Safe to move to another thread",
                    "Can be copied",
                    "Is heap allocated",
                ],
                "Safe to move to another thread",
                Difficulty::Hard,
                5,
            ),
            (
                "Which marker makes a struct field-order independent of layout?",
                [
                    "repr(C)",
                    "repr(Rust)",
                    "repr(packed)",
                    "repr(transparent)",
                ],
                "repr(Rust)",
                Difficulty::Hard,
                5,
            ),
            (
                "What does `Pin` prevent?",
                ["Dropping", "Moving the pointee", "Cloning", "Sharing"],
                "Moving the pointee",
                Difficulty::Hard,
                5,
            ),
            (
                "Which lifetime outlives all others?",
                ["'a", "'_", "'static", "'self"],
                "'static",
                Difficulty::Hard,
                5,
            ),
            (
                "What is a zero-sized type's size?",
                ["1 byte", "0 bytes", "8 bytes", "Undefined"],
                "0 bytes",
                Difficulty::Hard,
                5,
            ),
        ],
    },
    SampleQuiz {
        title: "Networking Basics",
        time_limit_minutes: 10,
        questions: &[
            (
                "Which port does HTTPS use by default?",
                ["80", "443", "22", "8080"],
                "443",
                Difficulty::Easy,
                2,
            ),
            (
                "What does DNS resolve?",
                ["MAC addresses", "Names to addresses", "Routes", "Ports"],
                "Names to addresses",
                Difficulty::Easy,
                2,
            ),
            (
                "Which protocol is connectionless?",
                ["TCP", "UDP", "TLS", "SSH"],
                "UDP",
                Difficulty::Easy,
                2,
            ),
            (
                "Which HTTP method is idempotent?",
                ["POST", "PATCH", "PUT", "CONNECT"],
                "PUT",
                Difficulty::Medium,
                3,
            ),
            (
                "How many bits are in an IPv6 address?",
                ["32", "64", "128", "256"],
                "128",
                Difficulty::Medium,
                3,
            ),
            (
                "Which status code means Conflict?",
                ["400", "404", "409", "503"],
                "409",
                Difficulty::Medium,
                3,
            ),
            (
                "What does the TCP three-way handshake start with?",
                ["ACK", "SYN", "FIN", "RST"],
                "SYN",
                Difficulty::Hard,
                4,
            ),
            (
                "Which mechanism avoids TCP congestion collapse?",
                ["Nagle", "Slow start", "Keep-alive", "MTU probing"],
                "Slow start",
                Difficulty::Hard,
                4,
            ),
        ],
    },
];

/// Inserts the sample quiz bank when no quiz exists yet.
///
/// Returns the number of questions inserted. Questions that break the question
/// invariants are skipped with a warning.
pub async fn seed_sample_quizzes(pool: &SqlitePool) -> Result<usize, sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quizzes")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for quiz in SAMPLE_QUIZZES {
        let quiz_id = sqlx::query("INSERT INTO quizzes (title, time_limit_minutes) VALUES (?, ?)")
            .bind(quiz.title)
            .bind(quiz.time_limit_minutes)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        for (prompt, options, correct, difficulty, points) in quiz.questions {
            let question = match Question::new(
                0,
                quiz_id,
                *prompt,
                options.map(String::from),
                *correct,
                *difficulty,
                *points,
            ) {
                Ok(question) => question,
                Err(e) => {
                    tracing::warn!("Skipping sample question '{}': {}", prompt, e);
                    continue;
                }
            };

            let [a, b, c, d] = &question.options;
            sqlx::query(
                r#"
                INSERT INTO questions
                    (quiz_id, prompt, option_a, option_b, option_c, option_d,
                     correct_option, difficulty, points)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(quiz_id)
            .bind(&question.prompt)
            .bind(a)
            .bind(b)
            .bind(c)
            .bind(d)
            .bind(&question.correct_option)
            .bind(question.difficulty.as_str())
            .bind(i64::from(question.points))
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }
    }

    tx.commit().await?;
    tracing::info!("Seeded {} sample questions", inserted);
    Ok(inserted)
}
