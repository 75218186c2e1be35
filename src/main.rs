mod catalog;
mod cli;
mod error;
mod fetch;
mod interactive;
mod page;
mod resolver;
mod server;
mod session;
mod util;

use clap::Parser;
use cli::CliArgs;
use error::Result;
use resolver::{GenerationRequest, ValidationError};

/// Exit status for rejected form input, distinct from infrastructure failures.
const EXIT_INVALID_INPUT: i32 = 2;

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

enum Outcome {
    Done,
    Rejected(ValidationError),
}

async fn run(args: CliArgs) -> Result<Outcome> {
    let request: GenerationRequest = if args.interactive {
        interactive::prompt_request()?
    } else {
        args.generation_request()?
    };

    let result = match resolver::resolve(&request) {
        Ok(result) => result,
        Err(err) => return Ok(Outcome::Rejected(err)),
    };

    println!("{}", result.caption());
    println!("{}", result.image_url);

    if let Some(path) = &args.output {
        let session = session::HttpSession::new(&args.session_config())?;
        let image = fetch::download_image(&session, &result.image_url).await?;
        fetch::save_image(&image, path).await?;
        println!(
            "saved {} bytes from {} to {}",
            image.bytes.len(),
            image.final_url,
            path.display()
        );
    }

    Ok(Outcome::Done)
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = CliArgs::parse();

    let result = if args.serve {
        server::run_server(&args).await.map(|()| Outcome::Done)
    } else {
        run(args).await
    };

    match result {
        Ok(Outcome::Done) => {}
        Ok(Outcome::Rejected(err)) => {
            eprintln!("{err}");
            std::process::exit(EXIT_INVALID_INPUT);
        }
        Err(error) => {
            tracing::error!("{error:?}");
            std::process::exit(1);
        }
    }
}
