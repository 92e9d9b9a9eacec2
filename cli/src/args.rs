use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "kubesource")]
#[command(
    author,
    version,
    about = "Render kustomize sources and vendor filtered manifests into target directories"
)]
pub struct Args {
    /// Directory to search for kubesource.yaml files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// kustomize binary to invoke
    #[arg(long, value_name = "BIN", env = "KUBESOURCE_KUSTOMIZE", default_value = "kustomize")]
    pub kustomize: String,

    /// Continue with the remaining directories after a failure
    #[arg(short = 'k', long)]
    pub keep_going: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
