use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use nlp2fhir_core::{
    config::backend_url_from_env_value,
    render::render_section_options,
    FormConfig, FormController, HttpBackend, Request, SectionRegistry,
};
use nlp2fhir_files::DirectorySaver;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nlp2fhir")]
#[command(about = "Build clinical narrative sections and convert them to a FHIR bundle")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every registered section code
    Sections,
    /// Print the label of a section code
    Lookup {
        /// Section code, e.g. 8716-3
        code: String,
    },
    /// Render the sections of a form
    Show(FormArgs),
    /// Print the JSON payload that would be submitted
    Payload(FormArgs),
    /// Submit the form and save the returned ResourceBundle.json
    Generate {
        #[command(flatten)]
        form: FormArgs,
        /// Backend base URL (overrides NLP2FHIR_BACKEND_URL)
        #[arg(long)]
        backend: Option<String>,
        /// Directory to save the bundle in (overrides NLP2FHIR_DOWNLOAD_DIR)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct FormArgs {
    /// Draft to start from (.json, .yaml or .yml)
    #[arg(long)]
    draft: Option<PathBuf>,
    /// Section to append, as CODE, CODE=BODY or CODE=@FILE (repeatable)
    #[arg(long = "section", value_parser = parse_section_arg)]
    sections: Vec<SectionArg>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SectionBody {
    Empty,
    Text(String),
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SectionArg {
    code: String,
    body: SectionBody,
}

fn parse_section_arg(raw: &str) -> Result<SectionArg, String> {
    let (code, body) = match raw.split_once('=') {
        Some((code, body)) => match body.strip_prefix('@') {
            Some(path) if !path.is_empty() => (code, SectionBody::File(PathBuf::from(path))),
            Some(_) => return Err("expected a file path after '@'".into()),
            None => (code, SectionBody::Text(body.to_owned())),
        },
        None => (raw, SectionBody::Empty),
    };

    let code = code.trim();
    if code.is_empty() {
        return Err("section code must not be empty".into());
    }

    Ok(SectionArg {
        code: code.to_owned(),
        body,
    })
}

fn load_draft(path: &Path) -> anyhow::Result<Request> {
    Request::from_path(path).with_context(|| format!("failed to load draft {}", path.display()))
}

/// Builds a form from the optional draft, then appends `--section` flags in order.
fn build_form(args: &FormArgs) -> anyhow::Result<FormController> {
    let mut form = match &args.draft {
        Some(path) => FormController::from_request(load_draft(path)?),
        None => FormController::new(),
    };

    for section in &args.sections {
        let index = form.add_section();
        form.set_code(index, section.code.as_str())?;
        match &section.body {
            SectionBody::Empty => {}
            SectionBody::Text(body) => {
                form.set_body(index, body.as_str())?;
            }
            SectionBody::File(path) => {
                let body = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read section body {}", path.display()))?;
                form.set_body(index, body)?;
            }
        }
    }

    Ok(form)
}

/// Resolves configuration from the environment, then applies command-line overrides.
fn config_from_env(
    backend: Option<String>,
    out_dir: Option<PathBuf>,
) -> anyhow::Result<FormConfig> {
    let mut config = FormConfig::from_env_values(
        std::env::var("NLP2FHIR_BACKEND_URL").ok(),
        std::env::var("NLP2FHIR_DOWNLOAD_DIR").ok(),
        std::env::var("NLP2FHIR_SUBMIT_TIMEOUT_SECS").ok(),
    )?;

    if let Some(url) = backend {
        config = config.with_backend_url(backend_url_from_env_value(Some(url))?)?;
    }
    if let Some(dir) = out_dir {
        config = config.with_download_dir(dir);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nlp2fhir=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Sections) => {
            print!("{}", render_section_options());
        }
        Some(Commands::Lookup { code }) => match SectionRegistry::lookup(&code) {
            Some(label) => println!("{}", label),
            None => bail!("unknown section code: {}", code),
        },
        Some(Commands::Show(args)) => {
            let form = build_form(&args)?;
            print!("{}", form.render());
        }
        Some(Commands::Payload(args)) => {
            let mut form = build_form(&args)?;
            let payload = form.prepare_submission();
            println!("{}", payload.to_json()?);
        }
        Some(Commands::Generate {
            form,
            backend,
            out_dir,
        }) => {
            let mut controller = build_form(&form)?;
            let config = config_from_env(backend, out_dir)?;
            let backend = HttpBackend::new(&config)?;
            let saver = DirectorySaver::create(config.download_dir())?;

            tracing::info!("submitting {} section(s)", controller.request().len());
            let saved = controller.generate(&backend, &saver).await?;
            println!("Saved {} ({} bytes)", saved.location, saved.size_bytes);
        }
        None => {
            println!("Use 'nlp2fhir --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn section_arg_forms() {
        assert_eq!(
            parse_section_arg("8716-3").unwrap(),
            SectionArg {
                code: "8716-3".into(),
                body: SectionBody::Empty
            }
        );
        assert_eq!(
            parse_section_arg("8716-3=BP 120/80, HR 72").unwrap().body,
            SectionBody::Text("BP 120/80, HR 72".into())
        );
        assert_eq!(
            parse_section_arg("8716-3=a=b").unwrap().body,
            SectionBody::Text("a=b".into())
        );
        assert_eq!(
            parse_section_arg("8716-3=@notes/vitals.txt").unwrap().body,
            SectionBody::File(PathBuf::from("notes/vitals.txt"))
        );
        assert_eq!(
            parse_section_arg("8716-3=").unwrap().body,
            SectionBody::Text(String::new())
        );
    }

    #[test]
    fn section_arg_rejects_missing_parts() {
        assert!(parse_section_arg("").is_err());
        assert!(parse_section_arg("=body").is_err());
        assert!(parse_section_arg("8716-3=@").is_err());
    }

    #[test]
    fn unknown_codes_are_kept_without_label() {
        let args = FormArgs {
            draft: None,
            sections: vec![parse_section_arg("XYZ=free text").unwrap()],
        };

        let form = build_form(&args).unwrap();

        let section = &form.request().sections()[0];
        assert_eq!(section.code(), "XYZ");
        assert_eq!(section.label(), None);
        assert_eq!(section.body(), "free text");
    }

    #[test]
    fn draft_then_flags_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let draft = temp_dir.path().join("draft.yaml");
        fs::write(
            &draft,
            "sections:\n  - id: \"10154-3\"\n    name: Stale label\n    body: Headache\n",
        )
        .unwrap();
        let body_file = temp_dir.path().join("vitals.txt");
        fs::write(&body_file, "BP 120/80\n").unwrap();

        let args = FormArgs {
            draft: Some(draft),
            sections: vec![
                parse_section_arg(&format!("8716-3=@{}", body_file.display())).unwrap(),
                parse_section_arg("29762-2").unwrap(),
            ],
        };

        let mut form = build_form(&args).unwrap();
        let payload = form.prepare_submission();

        let codes: Vec<&str> = payload.sections().iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec!["10154-3", "8716-3", "29762-2"]);
        assert_eq!(
            payload.sections()[0].label(),
            Some("Chief complaint Narrative - Reported")
        );
        assert_eq!(payload.sections()[1].body(), "BP 120/80\n");
        assert_eq!(payload.sections()[2].body(), "");
    }

    #[test]
    fn json_draft_loads() {
        let temp_dir = TempDir::new().unwrap();
        let draft = temp_dir.path().join("draft.json");
        fs::write(
            &draft,
            r#"{"sections":[{"id":"8716-3","name":"Vital signs","body":"BP 120/80"}]}"#,
        )
        .unwrap();

        let request = load_draft(&draft).unwrap();

        assert_eq!(request.len(), 1);
        assert_eq!(request.sections()[0].body(), "BP 120/80");
    }

    #[test]
    fn unsupported_draft_extension_fails() {
        let temp_dir = TempDir::new().unwrap();
        let draft = temp_dir.path().join("draft.txt");
        fs::write(&draft, "sections: []").unwrap();

        let err = load_draft(&draft).unwrap_err();

        assert!(format!("{:#}", err).contains("unsupported draft format"));
    }

    #[test]
    fn missing_draft_fails() {
        let temp_dir = TempDir::new().unwrap();

        assert!(load_draft(&temp_dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn cli_parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "nlp2fhir",
            "generate",
            "--section",
            "8716-3=BP",
            "--section",
            "61149-1",
            "--backend",
            "http://pipeline:8080",
            "--out-dir",
            "out",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Generate {
                form,
                backend,
                out_dir,
            }) => {
                assert_eq!(form.sections.len(), 2);
                assert_eq!(backend.as_deref(), Some("http://pipeline:8080"));
                assert_eq!(out_dir, Some(PathBuf::from("out")));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn out_dir_override_is_used_verbatim() {
        let dir = PathBuf::from(" exports/ward 7 ");

        let config = config_from_env(None, Some(dir.clone())).unwrap();

        assert_eq!(config.download_dir(), dir.as_path());
    }
}
