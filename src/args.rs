use clap::{Parser, ValueEnum};
use seo_signals::CanonicalPolicy;

#[derive(Parser, Debug)]
#[command(name = "seo-signals")]
#[command(about = "Extracts on-page SEO signals from one page and scores them")]
#[command(version)]
pub struct Args {
    /// URL of the page to analyze
    pub url: String,

    /// Maximum number of concurrent network checks [default: 5]
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Timeout in seconds for each network check [default: 10]
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// JSON configuration file; command-line flags override it
    #[arg(long)]
    pub config: Option<String>,

    /// How a missing canonical link affects indexability
    #[arg(long, value_enum)]
    pub canonical_policy: Option<CanonicalPolicyArg>,

    /// Render the page through a WebDriver server (optionally at this URL)
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    pub webdriver: Option<String>,

    /// Print facts and scores as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CanonicalPolicyArg {
    /// A page without a canonical link can still be indexable
    AbsentPasses,
    /// A page must declare itself canonical to be indexable
    AbsentFails,
}

/// Convert from CLI argument policy to the library policy
pub fn convert_canonical_policy(arg: CanonicalPolicyArg) -> CanonicalPolicy {
    match arg {
        CanonicalPolicyArg::AbsentPasses => CanonicalPolicy::AbsentPasses,
        CanonicalPolicyArg::AbsentFails => CanonicalPolicy::AbsentFails,
    }
}
