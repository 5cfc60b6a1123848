use console::Style;
use skydisk_core::pipeline::{BatchSummary, PipelineConfig};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_pipeline_summary(config: &PipelineConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("skydisk"));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(&config.input)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(&config.output)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(config.frames)
    );

    let cb = &config.color_balance;
    if cb.enabled {
        println!(
            "  {:<14}{} {}",
            s.label.apply_to("Balance"),
            s.method.apply_to(cb.adaptation),
            s.value.apply_to(format!("{}% cutoff", cb.percent_cutoff))
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Balance"),
            s.disabled.apply_to("disabled")
        );
    }

    let diameter = if config.projection.diameter > 0 {
        config.projection.diameter.to_string()
    } else {
        "source height".to_string()
    };
    println!(
        "  {:<14}{} {}",
        s.label.apply_to("Disk"),
        s.value.apply_to(diameter),
        s.method.apply_to(config.projection.interpolation)
    );
    println!();
}

pub fn print_batch_result(summary: &BatchSummary, config: &PipelineConfig) {
    let s = Styles::new();
    println!(
        "  {} {} frame(s) at {}x{} in {:.1}s",
        s.title.apply_to("Done processing"),
        s.value.apply_to(summary.frames_processed),
        summary.diameter,
        summary.diameter,
        summary.elapsed.as_secs_f64()
    );
    println!("  {:<14}{}", s.label.apply_to("Output"), s.path.apply_to(&config.output));
}
