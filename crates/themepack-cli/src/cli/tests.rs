#[cfg(test)]
mod tests {
    use crate::cli::validation::{parse_release, parse_theme_name};
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_theme_name() {
        assert_eq!(parse_theme_name("my-theme"), Ok("my-theme".to_string()));
        assert_eq!(parse_theme_name("dojo"), Ok("dojo".to_string()));

        assert!(parse_theme_name("").is_err());
        assert!(parse_theme_name("  ").is_err());
        assert!(parse_theme_name("a/b").is_err());
        assert!(parse_theme_name("a\\b").is_err());
        assert!(parse_theme_name("..").is_err());
    }

    #[test]
    fn test_parse_release() {
        assert_eq!(parse_release("1.1.1"), Ok("1.1.1".to_string()));
        assert_eq!(parse_release("2.0.0-beta.1"), Ok("2.0.0-beta.1".to_string()));

        assert!(parse_release("").is_err());
        assert!(parse_release("1.0 beta").is_err());
        assert!(parse_release("1/0").is_err());
    }

    #[test]
    fn test_build_short_flags() {
        let cli = Cli::try_parse_from(["themepack", "build", "-n", "my-theme", "-r", "1.2.0"])
            .unwrap();

        match cli.command {
            Command::Build(args) => {
                assert_eq!(args.theme.name.as_deref(), Some("my-theme"));
                assert_eq!(args.theme.release.as_deref(), Some("1.2.0"));
                assert!(args.theme.cwd.is_none());
                assert!(args.theme.config.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_build_long_flags() {
        let cli = Cli::try_parse_from([
            "themepack",
            "build",
            "--name",
            "my-theme",
            "--release",
            "3.0.0",
            "--cwd",
            "/project",
            "--config",
            "custom.json",
        ])
        .unwrap();

        match cli.command {
            Command::Build(args) => {
                assert_eq!(args.theme.name.as_deref(), Some("my-theme"));
                assert_eq!(args.theme.cwd, Some(PathBuf::from("/project")));
                assert_eq!(args.theme.config, Some(PathBuf::from("custom.json")));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_build_name_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["themepack", "build"]).unwrap();
        match cli.command {
            Command::Build(args) => assert!(args.theme.name.is_none()),
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_build_rejects_invalid_name() {
        assert!(Cli::try_parse_from(["themepack", "build", "--name", "a/b"]).is_err());
    }

    #[test]
    fn test_eject_default_out() {
        let cli = Cli::try_parse_from(["themepack", "eject", "-n", "my-theme"]).unwrap();
        match cli.command {
            Command::Eject(args) => {
                assert_eq!(args.theme.name.as_deref(), Some("my-theme"));
                assert_eq!(args.out, PathBuf::from("config/build-theme"));
            }
            _ => panic!("Expected Eject command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["themepack", "build", "-n", "t", "--verbose", "--no-color"])
            .unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["themepack", "-q", "-v", "build", "-n", "t"]);
        assert!(result.is_err());
    }
}
