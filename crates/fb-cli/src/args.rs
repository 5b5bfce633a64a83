//! Command-line flags.

use std::path::PathBuf;

pub const USAGE: &str = "\
usage: fill-bench [--config PATH] [--backend vello|null] [--gpu] [--json]

  --config PATH     load a JSON bench config (defaults apply to missing keys)
  --backend NAME    `vello` encodes each frame with Vello (default),
                    `null` records frames in memory only
  --gpu             also rasterize every frame on the GPU (vello backend)
  --json            print results as a JSON array
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Vello,
    Null,
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vello" => Ok(Backend::Vello),
            "null" => Ok(Backend::Null),
            other => Err(format!("unknown backend `{other}` (expected vello or null)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub backend: Backend,
    pub gpu: bool,
    pub json: bool,
    pub help: bool,
}

impl Args {
    pub fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut out = Args::default();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" => {
                    let path = iter.next().ok_or("--config needs a path")?;
                    out.config = Some(PathBuf::from(path));
                }
                "--backend" => {
                    let name = iter.next().ok_or("--backend needs a name")?;
                    out.backend = name.parse()?;
                }
                "--gpu" => out.gpu = true,
                "--json" => out.json = true,
                "-h" | "--help" => out.help = true,
                other => return Err(format!("unexpected argument `{other}`")),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Args, String> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
        assert_eq!(Args::default().backend, Backend::Vello);
    }

    #[test]
    fn all_flags() {
        let args = parse(&["--config", "bench.json", "--backend", "null", "--gpu", "--json"]).unwrap();
        assert_eq!(
            args,
            Args {
                config: Some(PathBuf::from("bench.json")),
                backend: Backend::Null,
                gpu: true,
                json: true,
                help: false,
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--backend", "skia"]).unwrap_err().contains("skia"));
        assert!(parse(&["--fast"]).is_err());
    }
}
