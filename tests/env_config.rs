//! Environment-variable fallbacks for the connection options.
//!
//! Kept in its own test binary so the variables set here cannot leak into
//! the flag-based parsing tests.

use clap::Parser;
use migration_verify::VerifyArgs;

#[test]
fn test_verify_args_from_environment() {
    std::env::set_var("MONGO_URI", "mongodb://mongodb:27017");
    std::env::set_var("MONGO_DATABASE", "legacy");
    std::env::set_var("PG_HOST", "postgresql");
    std::env::set_var("PG_PORT", "6432");
    std::env::set_var("PG_DATABASE", "app");
    std::env::set_var("PG_USER", "migrator");
    std::env::set_var("PG_PASSWORD", "secret");

    let args = VerifyArgs::try_parse_from(["migration-verify"]).unwrap();

    assert_eq!(args.source.source_uri, "mongodb://mongodb:27017");
    assert_eq!(args.source.source_database, "legacy");
    assert_eq!(args.destination.destination_host, "postgresql");
    assert_eq!(args.destination.destination_port, 6432);
    assert_eq!(args.destination.destination_database, "app");
    assert_eq!(args.destination.destination_user, "migrator");
    assert_eq!(args.destination.destination_password, "secret");

    // Flags take precedence over the environment.
    let args =
        VerifyArgs::try_parse_from(["migration-verify", "--destination-host", "pg.internal"])
            .unwrap();
    assert_eq!(args.destination.destination_host, "pg.internal");
    assert_eq!(args.destination.destination_port, 6432);
}
