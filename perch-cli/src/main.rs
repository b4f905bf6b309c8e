//! Perch CLI - popover placement from the command line
//!
//! Usage:
//!   perch resolve --trigger T,R,B,L --popover WxH [--placement P] [--policy P]
//!   perch ideal   --trigger T,R,B,L --popover WxH --placement P
//!   perch table   --trigger T,R,B,L --popover WxH [--policy P]
//!
//! Every subcommand accepts `--viewport WxH`, `--options FILE` and `--json`.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use serde_json::json;
use strum::IntoEnumIterator;

use perch_placement::{
    ClientRect, ContainPolicy, IdealRect, Overflow, Placement, RequestedPlacement, Viewport,
    contain, ideal_rect, resolve_placement,
};
use perch_popover::PopoverOptions;

/// Perch - resolve where a popover goes next to its trigger
#[derive(Parser, Debug)]
#[command(name = "perch")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r"EXAMPLES:
    # Popover above a trigger in the top-left corner; flips below
    perch resolve --trigger 5,55,35,5 --popover 200x100 --placement top

    # Same, flipping only vertically, as JSON
    perch resolve --trigger 5,55,35,5 --popover 200x100 --placement top --policy flipY --json

    # Let the policy pick a side
    perch resolve --trigger 700,520,740,480 --popover 200x100 --placement ''

    # Where would rightTop go, and does it fit?
    perch ideal --trigger 400,520,440,480 --popover 120x80 --placement rightTop

    # Every placement at once, with a custom viewport
    perch table --trigger 400,520,440,480 --popover 120x80 --viewport 1000x800
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a placement, correcting overflow with the contain policy
    Resolve(Geometry),
    /// Show the unconstrained rectangle of one placement and its overflow
    Ideal(Geometry),
    /// Show every placement's ideal rectangle, overflow and corrected result
    Table(Geometry),
}

#[derive(Args, Debug)]
struct Geometry {
    /// Trigger bounding rectangle as TOP,RIGHT,BOTTOM,LEFT
    #[arg(long, value_name = "T,R,B,L", value_parser = parse_edges)]
    trigger: ClientRect,

    /// Rendered popover size
    #[arg(long, value_name = "WxH")]
    popover: Size,

    /// Viewport size (default: from --options, else 1280x720)
    #[arg(long, value_name = "WxH")]
    viewport: Option<Size>,

    /// Requested placement; an empty string lets the policy pick a side
    /// (default: from --options, else bottom)
    #[arg(long)]
    placement: Option<String>,

    /// Contain policy: flip, flipX, flipY or none (default: from --options,
    /// else flip)
    #[arg(long)]
    policy: Option<String>,

    /// Popover options JSON file supplying defaults
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

/// A `WIDTHxHEIGHT` pair.
#[derive(Debug, Clone, Copy)]
struct Size {
    width: f64,
    height: f64,
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        Ok(Self {
            width: parse_number(width)?,
            height: parse_number(height)?,
        })
    }
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))
}

fn parse_edges(s: &str) -> Result<ClientRect, String> {
    let edges = s
        .split(',')
        .map(parse_number)
        .collect::<Result<Vec<_>, _>>()?;
    match edges[..] {
        [top, right, bottom, left] => Ok(ClientRect::from_edges(top, right, bottom, left)),
        _ => Err(format!("expected TOP,RIGHT,BOTTOM,LEFT, got '{s}'")),
    }
}

/// Geometry and settings after applying `--options` defaults.
struct Setup {
    trigger: ClientRect,
    popover: ClientRect,
    viewport: Viewport,
    placement: String,
    policy: ContainPolicy,
    json: bool,
}

impl Geometry {
    fn setup(&self) -> Result<Setup> {
        let options = match &self.options {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str::<PopoverOptions>(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => PopoverOptions::default(),
        };

        let viewport = match self.viewport {
            Some(size) => Viewport::new(size.width, size.height)?,
            None => options.initial_window_size,
        };
        let policy = match &self.policy {
            Some(name) => name.parse()?,
            None => options.contain_policy,
        };
        let placement = self
            .placement
            .clone()
            .unwrap_or_else(|| options.placement.to_string());

        let Size { width, height } = self.popover;
        Ok(Setup {
            trigger: self.trigger,
            popover: ClientRect::from_origin_size(0.0, 0.0, width, height),
            viewport,
            placement,
            policy,
            json: self.json,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Resolve(geometry) => run_resolve(&geometry.setup()?),
        Command::Ideal(geometry) => run_ideal(&geometry.setup()?),
        Command::Table(geometry) => run_table(&geometry.setup()?),
    }
}

fn policy_name(policy: &ContainPolicy) -> &'static str {
    policy.name().unwrap_or("none")
}

fn run_resolve(setup: &Setup) -> Result<()> {
    let requested = RequestedPlacement::from(setup.placement.as_str());
    let state = resolve_placement(
        &requested,
        Some(&setup.trigger),
        Some(&setup.popover),
        &setup.policy,
        &setup.viewport,
    )?
    .ok_or_else(|| anyhow!("trigger or popover could not be measured"))?;

    if setup.json {
        println!("{}", serde_json::to_string_pretty(&state.result)?);
        return Ok(());
    }

    let requested = if setup.placement.is_empty() {
        "(none)"
    } else {
        setup.placement.as_str()
    };
    println!(
        "{:<10} {}",
        "placement".bold(),
        state.result.placement.green()
    );
    println!(
        "{:<10} {} {}",
        "requested".bold(),
        requested,
        format!("(policy {})", policy_name(&setup.policy)).dimmed()
    );
    println!("{:<10} {}", "style".bold(), state.result.style);
    Ok(())
}

fn run_ideal(setup: &Setup) -> Result<()> {
    if setup.placement.is_empty() {
        bail!("ideal needs a placement");
    }
    let placement = Placement::from_str(&setup.placement)
        .map_err(|_| anyhow!("unknown placement '{}'", setup.placement))?;
    let rect = ideal_rect(placement, &setup.trigger, &setup.popover);
    let overflow = rect.overflow(setup.viewport);

    if setup.json {
        let value = json!({
            "placement": placement,
            "rect": rect,
            "overflow": overflow,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{:<10} {}", "placement".bold(), placement.green());
    println!("{:<10} {}", "rect".bold(), describe_rect(&rect));
    println!("{:<10} {}", "overflow".bold(), describe_overflow(overflow));
    Ok(())
}

fn run_table(setup: &Setup) -> Result<()> {
    let rows: Vec<_> = Placement::iter()
        .map(|placement| {
            let rect = ideal_rect(placement, &setup.trigger, &setup.popover);
            let overflow = rect.overflow(setup.viewport);
            let result = contain(
                Some(placement),
                &setup.trigger,
                &setup.popover,
                setup.viewport,
                &setup.policy,
            );
            (placement, rect, overflow, result)
        })
        .collect();

    if setup.json {
        let value: Vec<_> = rows
            .iter()
            .map(|(placement, rect, overflow, result)| {
                json!({
                    "placement": placement,
                    "rect": rect,
                    "overflow": overflow,
                    "result": result,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<18} {:<44} {:<18} {:<18} style (policy {})",
            "placement",
            "ideal rect",
            "overflow",
            "result",
            policy_name(&setup.policy)
        )
        .bold()
    );
    for (placement, rect, overflow, result) in rows {
        let overflow_text = format!("{:<18}", describe_overflow(overflow));
        let result_text = format!("{:<18}", result.placement.to_string());
        let overflow_cell = if overflow.any() {
            overflow_text.yellow().to_string()
        } else {
            overflow_text.green().to_string()
        };
        let result_cell = if result.placement == placement {
            result_text
        } else {
            result_text.cyan().to_string()
        };
        println!(
            "{:<18} {:<44} {} {} {}",
            placement.to_string(),
            describe_rect(&rect),
            overflow_cell,
            result_cell,
            result.style
        );
    }
    Ok(())
}

fn describe_rect(rect: &IdealRect) -> String {
    format!(
        "top {} right {} bottom {} left {}",
        rect.top, rect.right, rect.bottom, rect.left
    )
}

fn describe_overflow(overflow: Overflow) -> String {
    if !overflow.any() {
        return "fits".to_owned();
    }
    let mut text = String::new();
    for (axis, edges) in [("x", overflow.x), ("y", overflow.y)] {
        for (flag, edge) in [(edges.start, "start"), (edges.end, "end")] {
            if flag {
                if !text.is_empty() {
                    text.push(' ');
                }
                let _ = write!(text, "{axis}.{edge}");
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_and_edges() {
        let size: Size = "200x100".parse().unwrap();
        assert_eq!((size.width, size.height), (200.0, 100.0));
        assert!("200".parse::<Size>().is_err());

        let rect = parse_edges("5, 55, 35, 5").unwrap();
        assert_eq!(rect, ClientRect::from_edges(5.0, 55.0, 35.0, 5.0));
        assert!(parse_edges("1,2,3").is_err());
        assert!(parse_edges("a,b,c,d").is_err());
    }

    #[test]
    fn test_describe_overflow() {
        let rect = IdealRect {
            top: -10.0,
            right: 1010.0,
            bottom: 90.0,
            left: 810.0,
        };
        let viewport = Viewport {
            width: 1000.0,
            height: 800.0,
        };
        assert_eq!(describe_overflow(rect.overflow(viewport)), "x.end y.start");
        assert_eq!(describe_overflow(Overflow::default()), "fits");
    }
}
