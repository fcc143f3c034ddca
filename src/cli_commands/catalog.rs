use clap::Args;

#[derive(Args)]
pub(crate) struct CoursesArgs {
    /// Category to show ("all" for every category)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// beginner, intermediate or advanced
    #[arg(long)]
    pub(crate) difficulty: Option<String>,
    /// Match against title and description
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct CourseArgs {
    pub(crate) id: String,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct QuizArgs {
    pub(crate) id: String,
    /// Comma-separated option numbers (1-based), one per question, e.g. 2,1,3
    #[arg(long)]
    pub(crate) answers: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct ProfileArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct ContactArgs {
    /// Defaults to the signed-in learner's name
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Defaults to the signed-in learner's email
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long)]
    pub(crate) message: String,
}
