//*** START FILE: src/main.rs ***//
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use eframe::{egui, App, NativeOptions};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sentiment_detector::config::{self, Config, ScorerKind};
use sentiment_detector::error::ConfigError;
use sentiment_detector::report::{self, JsonReport, TextReport, VerdictSink};
use sentiment_detector::{Analyzer, Review};

const DEFAULT_CONFIG: &str = "config.toml";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScorerArg {
    Lexicon,
    Model,
}

#[derive(Parser, Debug)]
#[command(name = "sentiment-detector", version, about = "Aspect- and sarcasm-aware review sentiment")]
struct Cli {
    /// Config file; without it ./config.toml is used when present
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Analyse this review and print the verdict instead of opening the window
    #[arg(short, long, conflicts_with = "stdin")]
    text: Option<String>,
    /// Read the review from standard input
    #[arg(long)]
    stdin: bool,
    /// Print the verdict as JSON
    #[arg(long)]
    json: bool,
    /// Override the scorer variant from the config
    #[arg(long, value_enum)]
    scorer: Option<ScorerArg>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut loaded = match &cli.config {
        Some(path) => config::load_config_from_file(path)?,
        None => config::load_config_or_default(Path::new(DEFAULT_CONFIG))?,
    };
    if let Some(scorer) = cli.scorer {
        loaded.scorer = match scorer {
            ScorerArg::Lexicon => ScorerKind::Lexicon,
            ScorerArg::Model => ScorerKind::Model,
        };
    }
    Ok(loaded)
}

struct SentimentDetectorApp {
    analyzer: Option<Analyzer>,
    config_error: Option<String>,
    config_display: String,
    input: String,
    negative_field: String,
    neutral_field: String,
    positive_field: String,
    overall_field: String,
    sarcasm_field: String,
    aspects_output: String,
}

impl SentimentDetectorApp {
    fn new(_cc: &eframe::CreationContext<'_>, setup: Result<Analyzer, ConfigError>) -> Self {
        let (analyzer, config_error, config_display) = match setup {
            Ok(analyzer) => {
                let display = format!("Scorer: {}", analyzer.scorer_name());
                (Some(analyzer), None, display)
            }
            Err(e) => {
                error!(error = %e, "analyzer could not be built");
                (None, Some(e.to_string()), "Analyzer unavailable".to_string())
            }
        };
        Self {
            analyzer,
            config_error,
            config_display,
            input: String::new(),
            negative_field: String::new(),
            neutral_field: String::new(),
            positive_field: String::new(),
            overall_field: String::new(),
            sarcasm_field: String::new(),
            aspects_output: String::new(),
        }
    }

    fn clear_outputs(&mut self) {
        self.negative_field.clear();
        self.neutral_field.clear();
        self.positive_field.clear();
        self.overall_field.clear();
        self.sarcasm_field.clear();
        self.aspects_output.clear();
    }

    fn clear_all(&mut self) {
        self.clear_outputs();
        self.input.clear();
    }

    fn detect_sentiment(&mut self) {
        let Some(analyzer) = &self.analyzer else { return };
        let review = Review::new(self.input.clone());
        if review.is_blank() {
            return;
        }
        let verdict = analyzer.analyze(&review);

        self.clear_outputs();
        if let Some(b) = &verdict.breakdown {
            self.negative_field = report::percent(b.negative);
            self.neutral_field = report::percent(b.neutral);
            self.positive_field = report::percent(b.positive);
        }
        self.overall_field = report::score_summary(&verdict.overall);
        self.sarcasm_field = report::sarcasm_summary(&verdict.sarcasm);
        let lines = report::aspect_lines(&verdict);
        if !lines.is_empty() {
            self.aspects_output = format!("Aspect-level:\n{}", lines.join("\n"));
        }
    }
}

impl App for SentimentDetectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = &self.config_error {
                ui.colored_label(egui::Color32::RED, format!("Config: {}", err));
            } else {
                ui.colored_label(egui::Color32::GREEN, &self.config_display);
            }
            ui.separator();

            ui.label("Enter Your Review");
            ui.add(egui::TextEdit::multiline(&mut self.input).desired_rows(6).desired_width(f32::INFINITY));
            if ui.add_enabled(self.analyzer.is_some(), egui::Button::new("Analyze")).clicked() {
                self.detect_sentiment();
            }
            ui.add_space(8.0);

            egui::Grid::new("score_fields").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
                for (name, value) in [
                    ("Negative:", &self.negative_field),
                    ("Neutral:", &self.neutral_field),
                    ("Positive:", &self.positive_field),
                    ("Overall:", &self.overall_field),
                    ("Sarcasm/Irony:", &self.sarcasm_field),
                ] {
                    ui.label(name);
                    ui.label(value.as_str());
                    ui.end_row();
                }
            });
            ui.add_space(8.0);

            ui.label("Details by Aspect:");
            egui::ScrollArea::vertical().id_source("aspects_scroll").max_height(260.0).show(ui, |ui| {
                let mut display = self.aspects_output.clone();
                ui.add(
                    egui::TextEdit::multiline(&mut display)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY)
                        .interactive(false),
                );
            });
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    self.clear_all();
                }
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }
}

fn run_headless(cli: &Cli) -> ExitCode {
    let text = match (&cli.text, cli.stdin) {
        (Some(text), _) => text.clone(),
        (None, _) => {
            let mut buffer = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
                error!(error = %e, "failed to read review from stdin");
                return ExitCode::FAILURE;
            }
            buffer
        }
    };

    let analyzer = match load_config(cli).and_then(|c| Analyzer::from_config(&c)) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            error!(error = %e, "analyzer could not be built");
            return ExitCode::FAILURE;
        }
    };

    let review = Review::new(text);
    let verdict = analyzer.analyze(&review);
    let stdout = std::io::stdout().lock();
    if cli.json {
        JsonReport::new(stdout, true).present(&review, &verdict);
    } else {
        TextReport::new(stdout).present(&review, &verdict);
    }
    ExitCode::SUCCESS
}

fn run_gui(cli: &Cli) -> ExitCode {
    let setup = load_config(cli).and_then(|c| Analyzer::from_config(&c));
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([580.0, 800.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };
    info!("opening sentiment detector window");
    match eframe::run_native(
        "Sentiment Detector",
        options,
        Box::new(move |cc| Box::new(SentimentDetectorApp::new(cc, setup))),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "window failed");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    if cli.text.is_some() || cli.stdin {
        run_headless(&cli)
    } else {
        run_gui(&cli)
    }
}
//*** END FILE: src/main.rs ***//
