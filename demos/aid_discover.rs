use aid_discovery::{discover, CanonicalStr, Config};
use hickory_resolver::TokioAsyncResolver;
use std::{env, process};

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut args = env::args();

    let program = args.next();

    let (domain, protocol) = match (args.next(), args.next(), args.next()) {
        (Some(domain), protocol, None) => (domain, protocol),
        _ => {
            eprintln!("usage: {} <domain> [protocol]", program.as_deref().unwrap_or("aid-discover"));
            process::exit(1);
        }
    };

    let resolver = TokioAsyncResolver::tokio(Default::default(), Default::default());

    let config = Config::default();

    match discover(&resolver, &domain, protocol.as_deref(), &config).await {
        Ok(result) => {
            println!("query:    {}", result.query_name);
            println!("ttl:      {}", result.ttl);
            println!("version:  {}", result.record.version());
            println!("uri:      {}", result.record.uri());
            println!("protocol: {}", result.record.protocol());

            let record = &result.record;
            for (key, value) in [
                ("auth", record.auth()),
                ("desc", record.desc()),
                ("docs", record.docs()),
                ("dep", record.dep()),
                ("pka", record.pka()),
                ("kid", record.kid()),
            ] {
                if let Some(value) = value {
                    println!("{key:<9} {value}");
                }
            }
        }
        Err(e) => {
            eprintln!("{}: {e}", e.code().canonical_str());
            process::exit(1);
        }
    }
}
