use clap::Parser;

use super::*;

#[test]
fn test_parse_assignment() {
    assert_eq!(
        parse_assignment("anxiety_level=3"),
        Ok(("anxiety_level".to_string(), 3))
    );
    assert_eq!(
        parse_assignment(" sleep_quality = 0 "),
        Ok(("sleep_quality".to_string(), 0))
    );
    assert!(parse_assignment("anxiety_level").is_err());
    assert!(parse_assignment("=3").is_err());
    assert!(parse_assignment("anxiety_level=high").is_err());
}

#[test]
fn test_predict_command() {
    let cli = Cli::try_parse_from([
        "stress-predictor",
        "predict",
        "--set",
        "anxiety_level=3",
        "--set",
        "depression=2",
        "--format",
        "json",
        "--factor-policy",
        "raw",
    ])
    .unwrap();
    assert_eq!(cli.shared.factor_policy, FactorPolicy::Raw);
    assert!(!cli.shared.strict_fields);
    let Command::Predict(args) = cli.command else {
        panic!("expected predict");
    };
    assert_eq!(
        args.set,
        vec![("anxiety_level".to_string(), 3), ("depression".to_string(), 2)]
    );
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.input.is_none());
}

#[test]
fn test_dashboard_command_defaults() {
    let cli = Cli::try_parse_from(["stress-predictor", "dashboard", "--strict-fields"]).unwrap();
    assert!(cli.shared.strict_fields);
    assert_eq!(cli.shared.pipeline_options().factor_policy, FactorPolicy::InputScaled);
    let Command::Dashboard(args) = cli.command else {
        panic!("expected dashboard");
    };
    assert!(args.set.is_empty());
    assert_eq!(args.out, PathBuf::from("dashboard.html"));
}

#[test]
fn test_bad_assignment_rejected() {
    assert!(Cli::try_parse_from(["stress-predictor", "predict", "--set", "anxiety_level"]).is_err());
}
