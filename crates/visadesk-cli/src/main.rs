use std::env;
use std::error::Error;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde_json::json;
use tracing::info;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use visadesk_core::catalog::find_country;
use visadesk_core::catalog::Country;
use visadesk_core::catalog::COUNTRIES;
use visadesk_core::catalog::PRICING_PLANS;
use visadesk_core::config::Config;
use visadesk_core::contact::ContactForm;
use visadesk_core::contact::DeepLink;
use visadesk_core::state::RouteSelection;
use visadesk_core::state::SiteState;
use visadesk_core::UserAction;
use visadesk_exec::MessagingLink;
use visadesk_exec::PrintLink;
use visadesk_exec::SilentNotifier;
use visadesk_exec::SiteController;
use visadesk_exec::StrategyClient;
use visadesk_exec::SystemOpener;

mod content;
mod ui;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let config_path = take_config_flag(&mut args)?;
    let mut args = args.into_iter();
    let command = args.next().unwrap_or_else(|| "ui".to_string());
    let rest: Vec<String> = args.collect();

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("visadesk {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "ui" => {
            let config = load_config(config_path)?;
            let _guard = init_file_logging();
            info!("starting interactive desk");
            ui::run(config)
        }
        "strategy" => {
            let strategy = parse_strategy_args(&rest)?;
            let config = load_config(config_path)?;
            init_stderr_logging();
            run_strategy(config, strategy)
        }
        "contact" => {
            let contact = parse_contact_args(&rest)?;
            let config = load_config(config_path)?;
            init_stderr_logging();
            run_contact(config, contact)
        }
        "countries" => {
            for country in COUNTRIES.iter() {
                println!("{}  {}  {}", country.code, country.glyph, country.name);
            }
            Ok(())
        }
        "plans" => {
            print_plans();
            Ok(())
        }
        _ => {
            print_help();
            Err(format!("unknown command: {command}").into())
        }
    }
}

/// Removes `--config PATH` from anywhere in the argument list.
fn take_config_flag(args: &mut Vec<String>) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let Some(idx) = args.iter().position(|arg| arg == "--config") else {
        return Ok(None);
    };
    if idx + 1 >= args.len() {
        return Err("--config requires a path".into());
    }
    let path = args.remove(idx + 1);
    args.remove(idx);
    Ok(Some(PathBuf::from(path)))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("visadesk").join("config.toml"))
}

fn load_config(explicit: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let Some(path) = explicit.or_else(default_config_path) else {
        return Ok(Config::default());
    };
    Ok(Config::load(&path)?)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// The alternate screen owns stdout and stderr, so the desk logs to a file.
fn init_file_logging() -> Option<WorkerGuard> {
    let dir = dirs::data_local_dir()?.join("visadesk").join("logs");
    fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::daily(dir, "visadesk.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .ok()?;
    Some(guard)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StrategyArgs {
    from: String,
    to: String,
    json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ContactArgs {
    name: String,
    email: String,
    phone: String,
    note: String,
    from: Option<String>,
    to: Option<String>,
    accept: bool,
    open: bool,
    json: bool,
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, Box<dyn Error>> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value").into())
}

fn parse_strategy_args(args: &[String]) -> Result<StrategyArgs, Box<dyn Error>> {
    let mut from = None;
    let mut to = None;
    let mut json = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--from" => {
                from = Some(flag_value(args, i, "--from")?.to_string());
                i += 2;
            }
            "--to" => {
                to = Some(flag_value(args, i, "--to")?.to_string());
                i += 2;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            other => return Err(format!("unsupported argument: {other}").into()),
        }
    }
    let (Some(from), Some(to)) = (from, to) else {
        return Err("strategy requires --from and --to".into());
    };
    Ok(StrategyArgs { from, to, json })
}

fn parse_contact_args(args: &[String]) -> Result<ContactArgs, Box<dyn Error>> {
    let mut parsed = ContactArgs::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let takes_value = match flag {
            "--accept" => {
                parsed.accept = true;
                false
            }
            "--open" => {
                parsed.open = true;
                false
            }
            "--json" => {
                parsed.json = true;
                false
            }
            "--name" => {
                parsed.name = flag_value(args, i, flag)?.to_string();
                true
            }
            "--email" => {
                parsed.email = flag_value(args, i, flag)?.to_string();
                true
            }
            "--phone" => {
                parsed.phone = flag_value(args, i, flag)?.to_string();
                true
            }
            "--note" => {
                parsed.note = flag_value(args, i, flag)?.to_string();
                true
            }
            "--from" => {
                parsed.from = Some(flag_value(args, i, flag)?.to_string());
                true
            }
            "--to" => {
                parsed.to = Some(flag_value(args, i, flag)?.to_string());
                true
            }
            other => return Err(format!("unsupported argument: {other}").into()),
        };
        i += if takes_value { 2 } else { 1 };
    }
    Ok(parsed)
}

fn lookup_country(query: &str) -> Result<&'static Country, Box<dyn Error>> {
    find_country(query).ok_or_else(|| {
        format!("unknown country: {query} (run `visadesk countries` for the list)").into()
    })
}

fn resolve_route(from: Option<&str>, to: Option<&str>) -> Result<RouteSelection, Box<dyn Error>> {
    let defaults = RouteSelection::default();
    let origin = from.map(lookup_country).transpose()?.unwrap_or(defaults.origin);
    let destination = to
        .map(lookup_country)
        .transpose()?
        .unwrap_or(defaults.destination);
    Ok(RouteSelection::new(origin, destination))
}

fn run_strategy(config: Config, args: StrategyArgs) -> Result<(), Box<dyn Error>> {
    let route = resolve_route(Some(&args.from), Some(&args.to))?;
    let client = StrategyClient::from_config(&config.model);
    let mut site = SiteController::new(
        SiteState::new(config),
        Box::new(SilentNotifier),
        Box::new(PrintLink::stdout()),
    );

    site.user(UserAction::SetOrigin(route.origin));
    site.user(UserAction::SetDestination(route.destination));
    let effects = site.user(UserAction::GenerateStrategy);
    site.settle(&client, effects);

    let Some(result) = site.state().strategy.result.clone() else {
        return Err("strategy run did not complete".into());
    };

    if args.json {
        let payload = result
            .payload_json()
            .or_else(|| result.payload.clone().map(serde_json::Value::String));
        let out = json!({
            "origin": route.origin.name,
            "destination": route.destination.name,
            "provider": client.provider(),
            "payload": payload,
            "narrative": result.narrative,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Route: {}", route.label());
    if let Some(payload) = &result.payload {
        println!();
        println!("Status:");
        println!("{payload}");
    }
    println!();
    println!("{}", result.narrative);
    Ok(())
}

fn run_contact(config: Config, args: ContactArgs) -> Result<(), Box<dyn Error>> {
    let route = resolve_route(args.from.as_deref(), args.to.as_deref())?;
    let mut form = ContactForm::new(route);
    form.name = args.name;
    form.email = args.email;
    form.phone = args.phone;
    form.note = args.note;
    form.accepted = args.accept;

    let missing = form.missing_fields();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|field| field.label()).collect();
        return Err(format!("missing required fields: {}", names.join(", ")).into());
    }
    if !form.accepted {
        return Err("the Terms and Conditions must be accepted (pass --accept)".into());
    }
    let request = form.to_request()?;

    let message = request.compose_message(&config.site.brand);
    let link = DeepLink::new(&config.site.messaging_number, Some(&message));
    info!(origin = %request.origin, destination = %request.destination, "consultation request composed");

    if args.json {
        let out = json!({
            "request": request,
            "message": message,
            "url": link.url(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{message}");
        println!();
        println!("{}", link.url());
    }

    if args.open {
        if let Err(err) = SystemOpener.open(&link) {
            warn!(error = %err, "could not open messaging link");
        }
    }
    Ok(())
}

fn print_plans() {
    for plan in PRICING_PLANS.iter() {
        println!("{:<9} {}", plan.tier.label(), plan.price_label());
        println!("          {}", plan.description);
        for feature in plan.features {
            println!("          - {feature}");
        }
    }
}

fn print_help() {
    println!("visadesk {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  visadesk [--config PATH] [ui]");
    println!("  visadesk strategy --from COUNTRY --to COUNTRY [--json]");
    println!(
        "  visadesk contact --name NAME --email EMAIL --phone PHONE [--note TEXT] [--from COUNTRY] [--to COUNTRY] --accept [--open] [--json]"
    );
    println!("  visadesk countries");
    println!("  visadesk plans");
    println!("  visadesk --help");
    println!("  visadesk --version");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn config_flag_is_removed_wherever_it_appears() {
        let mut raw = args(&["strategy", "--config", "/tmp/c.toml", "--from", "US"]);
        let path = take_config_flag(&mut raw).expect("parse");
        assert_eq!(path, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(raw, args(&["strategy", "--from", "US"]));

        let mut dangling = args(&["--config"]);
        assert!(take_config_flag(&mut dangling).is_err());
    }

    #[test]
    fn strategy_requires_both_legs() {
        let parsed = parse_strategy_args(&args(&["--from", "US", "--to", "Germany", "--json"]))
            .expect("parse");
        assert_eq!(
            parsed,
            StrategyArgs {
                from: "US".to_string(),
                to: "Germany".to_string(),
                json: true,
            }
        );
        assert!(parse_strategy_args(&args(&["--from", "US"])).is_err());
        assert!(parse_strategy_args(&args(&["--to"])).is_err());
    }

    #[test]
    fn contact_flags_are_collected() {
        let parsed = parse_contact_args(&args(&[
            "--name", "Jane", "--email", "jane@x.com", "--phone", "+1555", "--to", "AE",
            "--accept",
        ]))
        .expect("parse");
        assert_eq!(parsed.name, "Jane");
        assert_eq!(parsed.to.as_deref(), Some("AE"));
        assert!(parsed.accept);
        assert!(!parsed.open);
        assert!(parse_contact_args(&args(&["--bogus", "x"])).is_err());
    }

    #[test]
    fn contact_without_acceptance_is_refused() {
        let contact = ContactArgs {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            phone: "+1555".to_string(),
            ..ContactArgs::default()
        };
        let err = run_contact(Config::default(), contact).expect_err("refused");
        assert!(err.to_string().contains("--accept"));
    }

    #[test]
    fn route_defaults_fill_missing_legs() {
        let route = resolve_route(None, Some("de")).expect("route");
        assert_eq!(route.origin.name, "Bangladesh");
        assert_eq!(route.destination.name, "Germany");
        assert!(resolve_route(Some("Atlantis"), None).is_err());
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(Some(dir.path().join("absent.toml"))).expect("config");
        assert_eq!(config.site.brand, "VISADESK");
    }
}
