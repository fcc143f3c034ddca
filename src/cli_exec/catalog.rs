use academy::catalog::{ContactDraft, CourseFilter, format_category};
use academy::gate::NavOutcome;
use academy::model::{Difficulty, Payload, Screen};

use super::*;

fn require_forwarded(outcome: NavOutcome) -> Result<()> {
    match outcome {
        NavOutcome::Forwarded => Ok(()),
        NavOutcome::Deferred => {
            anyhow::bail!("login required (run `academy login --email ...`)")
        }
    }
}

pub(super) fn handle_courses_command(
    client: &mut Client,
    category: Option<String>,
    difficulty: Option<String>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let filter = CourseFilter {
        category,
        difficulty: difficulty.as_deref().map(str::parse::<Difficulty>).transpose()?,
        query: search,
    };
    let courses = client.courses()?;
    let shown = filter.apply(&courses);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&shown).context("serialize courses json")?
        );
        return Ok(());
    }
    if shown.is_empty() {
        println!("No courses found");
    }
    for c in shown {
        println!(
            "{} {} [{} | {}] {} students",
            c.id,
            c.title,
            format_category(&c.category),
            c.difficulty.label(),
            c.students_enrolled
        );
    }
    Ok(())
}

pub(super) fn handle_course_command(client: &mut Client, id: &str, json: bool) -> Result<()> {
    require_forwarded(client.request_navigation(Screen::CourseDetail, Some(Payload::course(id))))?;
    let detail = client.course_detail(id)?;

    if json {
        let v = serde_json::json!({
            "course": detail.course,
            "lessons": detail.lessons,
            "quizzes": detail.quizzes,
            "progress": {
                "completed": detail.progress.completed,
                "total": detail.progress.total,
                "percent": detail.progress.percent,
                "status": detail.progress.status,
            },
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&v).context("serialize course json")?
        );
        return Ok(());
    }

    let c = &detail.course;
    println!("{}", c.title);
    println!(
        "{} | {} | {} students",
        format_category(&c.category),
        c.difficulty.label(),
        c.students_enrolled
    );
    if !c.description.is_empty() {
        println!();
        println!("{}", c.description);
    }
    println!();
    println!(
        "progress: {} ({}%, {})",
        detail.progress.label(),
        detail.progress.percent,
        detail.progress.status.label()
    );
    println!("lessons:");
    for (i, l) in detail.lessons.iter().enumerate() {
        match l.duration_minutes {
            Some(m) => println!("  {}. {} ({} min)", i + 1, l.title, m),
            None => println!("  {}. {}", i + 1, l.title),
        }
    }
    if !detail.quizzes.is_empty() {
        println!("quizzes:");
        for q in &detail.quizzes {
            println!("  {} {}", q.id, q.title);
        }
    }
    Ok(())
}

fn parse_answers(s: &str) -> Result<Vec<usize>> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let n: usize = p
                .parse()
                .with_context(|| format!("invalid answer `{}` (expected an option number)", p))?;
            if n == 0 {
                anyhow::bail!("option numbers start at 1");
            }
            Ok(n - 1)
        })
        .collect()
}

pub(super) fn handle_quiz_command(
    client: &mut Client,
    id: &str,
    answers: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut quiz = client.quiz(id)?;
    let payload = Payload::Quiz {
        course_id: quiz.quiz().course_id.clone(),
        quiz_id: id.to_string(),
    };
    require_forwarded(client.request_navigation(Screen::Quiz, Some(payload)))?;

    let Some(answers) = answers else {
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "quiz": quiz.quiz(),
                    "questions": quiz.questions(),
                }))
                .context("serialize quiz json")?
            );
            return Ok(());
        }
        println!("{}", quiz.quiz().title);
        for (i, q) in quiz.questions().iter().enumerate() {
            println!();
            println!("{}. {}", i + 1, q.question);
            for (j, opt) in q.options.iter().enumerate() {
                println!("   {}) {}", j + 1, opt);
            }
        }
        return Ok(());
    };

    for (question, option) in parse_answers(answers)?.into_iter().enumerate() {
        quiz.answer(question, option)?;
    }
    let score = client.submit_quiz(&mut quiz)?;
    if json {
        println!(
            "{}",
            serde_json::json!({
                "correct": score.correct,
                "total": score.total,
                "percent": score.percent,
            })
        );
    }
    Ok(())
}

pub(super) fn handle_profile_command(client: &mut Client, json: bool) -> Result<()> {
    require_forwarded(client.request_navigation(Screen::Profile, None))?;
    let summary = client.profile_summary()?;
    let (you, avg) = summary.stats.you_vs_average();

    if json {
        let v = serde_json::json!({
            "profile": summary.profile,
            "stats": {
                "courses": summary.stats.courses,
                "quizzes": summary.stats.quizzes,
                "completed": summary.stats.completed,
                "total": summary.stats.total,
                "you": you,
                "average": avg,
            },
            "recent_quizzes": summary.recent_quizzes,
            "recent_lessons": summary.recent_lessons,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&v).context("serialize profile json")?
        );
        return Ok(());
    }

    if let Some(p) = &summary.profile {
        println!("name: {}", p.full_name.as_deref().unwrap_or("-"));
        println!("email: {}", p.email);
    }
    println!("courses: {}", summary.stats.courses);
    println!("quizzes: {}", summary.stats.quizzes);
    println!(
        "completed: {}/{}",
        summary.stats.completed, summary.stats.total
    );
    println!("you vs average: {}% / {}%", you, avg);
    for a in &summary.recent_quizzes {
        println!(
            "quiz: {} {}% {}",
            a.quiz_title.as_deref().unwrap_or(&a.quiz_id),
            a.score,
            a.completed_at
        );
    }
    for r in &summary.recent_lessons {
        println!(
            "lesson: {} {}",
            r.lesson_title.as_deref().unwrap_or(&r.lesson_id),
            r.status.label()
        );
    }
    Ok(())
}

pub(super) fn handle_contact_command(
    client: &mut Client,
    name: Option<String>,
    email: Option<String>,
    message: &str,
) -> Result<()> {
    let mut draft: ContactDraft = client.contact_draft();
    if let Some(name) = name {
        draft.set_name(&name);
    }
    if let Some(email) = email {
        draft.set_email(&email);
    }
    draft.message = message.to_string();
    client.submit_contact(&draft)
}
