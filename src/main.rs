use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, error, warn};

use rust_assignment_tracker::config::AppConfig;
use rust_assignment_tracker::errors::TrackerError;
use rust_assignment_tracker::models::users::entities::User;
use rust_assignment_tracker::runtime::lifetime::startup::prepare_tracker;

/// 作业跟踪系统维护工具
#[derive(Debug, Parser)]
#[command(name = "rust-assignment-tracker", version, about)]
struct Cli {
    /// 配置文件基础名（不含扩展名）
    #[arg(long, default_value = "config", env = "TRACKER_CONFIG")]
    config: String,

    /// 覆盖数据目录
    #[arg(long)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 输出系统统计
    Stats,
    /// 登录并显示重建后的关系
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// 按邮箱删除用户（不级联）
    DeleteUser {
        #[arg(long)]
        email: String,
    },
    /// 校验邮箱验证码
    VerifyEmail {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
    },
    /// 重新发送验证码
    ResendCode {
        #[arg(long)]
        email: String,
    },
}

fn main() -> ExitCode {
    dotenv().ok();
    setup_panic!();
    let cli = Cli::parse();

    let mut config = match AppConfig::load_with_base(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", TrackerError::from(e).format_simple());
            return ExitCode::FAILURE;
        }
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.clone();
    }

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    debug!(
        "{} v{} starting, data dir: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.storage.data_dir
    );

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{} ({})", e, e.code());
            eprintln!("{}", report(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &AppConfig) -> Result<(), TrackerError> {
    let startup = prepare_tracker(config)?;
    let tracker = &startup.tracker;

    match command {
        Command::Stats => {
            println!("{}", tracker.statistics());
        }
        Command::Login { email, password } => {
            let user = tracker.login(&email, &password)?;
            print_session(&user);
        }
        Command::DeleteUser { email } => {
            if tracker.users().delete_user_by_email(&email)? {
                println!("Deleted user {email}");
            } else {
                warn!("No user with email {}", email);
                println!("No user with email {email}");
            }
        }
        Command::VerifyEmail { email, code } => {
            if tracker.users().verify_email(&email, &code)? {
                println!("Email verified: {email}");
            } else {
                println!("Invalid verification code for {email}");
            }
        }
        Command::ResendCode { email } => {
            if tracker.users().resend_verification_code(&email)? {
                println!("Verification code sent to {email}");
            } else {
                println!("{email} is already verified");
            }
        }
    }
    Ok(())
}

fn print_session(user: &User) {
    println!("Logged in as {} [{}]", user.display_name(), user.id());
    match user {
        User::Teacher(teacher) => {
            println!("  courses taught:      {}", teacher.courses_taught.join(", "));
            println!(
                "  assignments created: {}",
                teacher.assignments_created.join(", ")
            );
        }
        User::Student(student) => {
            println!("  enrolled courses: {}", student.enrolled_courses.join(", "));
            println!("  submissions:      {}", student.submissions.join(", "));
        }
    }
}

#[cfg(debug_assertions)]
fn report(e: &TrackerError) -> String {
    e.format_colored()
}

#[cfg(not(debug_assertions))]
fn report(e: &TrackerError) -> String {
    e.format_simple()
}
