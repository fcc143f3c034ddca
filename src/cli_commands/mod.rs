use clap::Subcommand;

pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod identity;

pub(crate) use self::config::ConfigCommands;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in with email and password
    Login(identity::LoginArgs),

    /// Create an account
    Signup(identity::SignupArgs),

    /// Log out (clears the stored session even if the service is unreachable)
    Logout,

    /// Show the signed-in learner
    Whoami(identity::WhoamiArgs),

    /// Start a Google or GitHub login and print the URL to open
    Oauth(identity::OauthArgs),

    /// Finish an OAuth login from the address the browser landed on
    Redirect(identity::RedirectArgs),

    /// Delete the signed-in account
    #[command(name = "delete-account")]
    DeleteAccount(identity::DeleteAccountArgs),

    /// List courses, optionally filtered
    Courses(catalog::CoursesArgs),

    /// Show one course with lessons, quizzes and progress (login required)
    Course(catalog::CourseArgs),

    /// Show a quiz, or answer and submit it (login required)
    Quiz(catalog::QuizArgs),

    /// Show profile statistics and recent activity (login required)
    Profile(catalog::ProfileArgs),

    /// Send a message to the academy
    Contact(catalog::ContactArgs),

    /// Show or change the local configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}
