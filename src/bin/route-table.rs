use clap::Parser;
use routetree::demo::DemoKind;

#[derive(Parser)]
#[command(name = "route-table")]
#[command(about = "Print the endpoint table of a demo route tree", long_about = None)]
struct Cli {
    /// Demo tree to inspect.
    #[arg(short, long, value_enum, default_value_t = DemoKind::Composition)]
    demo: DemoKind,

    /// Emit JSON instead of the indented text table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let endpoints = cli.demo.build().endpoints();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&endpoints)?);
    } else {
        for endpoint in &endpoints {
            println!("{endpoint}");
        }
    }

    Ok(())
}
