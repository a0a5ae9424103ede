use clap::Parser;
use tollgate::cli::{
    Args, Command, build_policy, init_logging, load_jwt_secret, run_filter, run_verify,
};
use tollgate::jwt::TokenCodec;
use tracing::error;

fn main() {
    let args = Args::parse();

    init_logging(&args.log_format);

    match args.command {
        Command::Verify {
            access,
            refresh,
            policy,
            username,
            emails,
        } => {
            let policy = match build_policy(policy, username.as_deref(), &emails) {
                Ok(policy) => policy,
                Err(e) => {
                    error!("{}", e);
                    std::process::exit(2);
                }
            };

            let Some(secret) = load_jwt_secret(args.jwt_secret_file.as_deref()) else {
                std::process::exit(1);
            };
            let codec = TokenCodec::new(secret.as_bytes()).with_access_duration(args.access_ttl);

            match run_verify(
                &codec,
                access.as_deref(),
                refresh.as_deref(),
                &policy,
                args.secure_cookies,
            ) {
                Ok(report) => println!("{}", report),
                Err(e) => {
                    error!(error = %e, "Failed to serialize verdict");
                    std::process::exit(1);
                }
            }
        }
        Command::Filter { params } => match run_filter(&params) {
            Ok(filter) => println!("{}", filter),
            Err(e) => {
                error!(error = %e, "Invalid query");
                std::process::exit(1);
            }
        },
    }
}
