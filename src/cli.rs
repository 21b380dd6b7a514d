use std::path::PathBuf;

use clap::Parser;
use intake_app::{ExternalProfile, LaunchOptions};
use intake_core::Tier;

#[derive(Debug, Parser)]
#[command(name = "audit-intake")]
#[command(about = "Five-step audit intake wizard with local drafts and background sync", long_about = None)]
pub struct Cli {
    /// Config file (defaults to <config dir>/audit-intake/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Preselect a tier: starter, growth, pro or enterprise
    #[arg(long, value_parser = parse_tier)]
    pub tier: Option<Tier>,

    /// Open with subscription pricing and start on the plan step
    #[arg(long)]
    pub subscribe: bool,

    /// Discard the saved draft before starting
    #[arg(long)]
    pub reset: bool,

    /// Session token handed over by an external sign-in
    #[arg(long)]
    pub sso_token: Option<String>,

    #[arg(long, requires = "sso_token")]
    pub sso_email: Option<String>,

    #[arg(long, requires = "sso_token")]
    pub sso_first_name: Option<String>,

    #[arg(long, requires = "sso_token")]
    pub sso_last_name: Option<String>,

    /// Error reported by a failed external sign-in
    #[arg(long, conflicts_with = "sso_token")]
    pub sso_error: Option<String>,
}

fn parse_tier(value: &str) -> Result<Tier, String> {
    Tier::parse(value).ok_or_else(|| {
        let names: Vec<&str> = Tier::ALL.iter().map(|t| t.as_str()).collect();
        format!("unknown tier `{value}` (expected one of: {})", names.join(", "))
    })
}

impl Cli {
    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            tier: self.tier,
            subscribe: self.subscribe,
        }
    }

    /// Token and profile of an SSO hand-off, if one was passed.
    pub fn external_session(&self) -> Option<(String, ExternalProfile)> {
        let token = self.sso_token.clone().filter(|t| !t.trim().is_empty())?;
        Some((
            token,
            ExternalProfile {
                email: self.sso_email.clone(),
                first_name: self.sso_first_name.clone(),
                last_name: self.sso_last_name.clone(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["audit-intake"]).unwrap();

        assert!(cli.config.is_none());
        assert_eq!(cli.launch_options(), LaunchOptions::default());
        assert!(cli.external_session().is_none());
        assert!(!cli.reset);
    }

    #[test]
    fn test_parse_launch_options() {
        let cli = Cli::try_parse_from(["audit-intake", "--tier", "PRO", "--subscribe"]).unwrap();

        assert_eq!(
            cli.launch_options(),
            LaunchOptions {
                tier: Some(Tier::Pro),
                subscribe: true,
            }
        );
    }

    #[test]
    fn test_unknown_tier_is_rejected() {
        let err = Cli::try_parse_from(["audit-intake", "--tier", "platinum"]).unwrap_err();
        assert!(err.to_string().contains("unknown tier `platinum`"));
    }

    #[test]
    fn test_sso_profile_requires_token() {
        assert!(Cli::try_parse_from(["audit-intake", "--sso-email", "a@b.com"]).is_err());

        let cli = Cli::try_parse_from([
            "audit-intake",
            "--sso-token",
            "tok",
            "--sso-email",
            "a@b.com",
            "--sso-first-name",
            "Ada",
        ])
        .unwrap();
        let (token, profile) = cli.external_session().unwrap();

        assert_eq!(token, "tok");
        assert_eq!(profile.email.as_deref(), Some("a@b.com"));
        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
        assert_eq!(profile.last_name, None);
    }

    #[test]
    fn test_blank_sso_token_is_ignored() {
        let cli = Cli::try_parse_from(["audit-intake", "--sso-token", "  "]).unwrap();
        assert!(cli.external_session().is_none());
    }
}
