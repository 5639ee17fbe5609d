use console::Style;
use fusion_core::registration::config::RegistrationConfig;
use fusion_core::registration::RegistrationOutput;

struct Styles {
    title: Style,
    header: Style,
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
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_registration_summary(config: &RegistrationConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Stack Registration"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(18)));
    println!();

    let server = match config.render.port {
        Some(port) => format!("{}:{}", config.render.host, port),
        None => config.render.host.clone(),
    };
    println!(
        "  {:<14}{}",
        s.label.apply_to("Render"),
        s.path.apply_to(server)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Project"),
        s.value
            .apply_to(format!("{}/{}", config.render.owner, config.render.project))
    );
    println!();

    println!("  {}", s.header.apply_to("Stacks"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Fixed"),
        s.value.apply_to(&config.stack_a)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Moving"),
        s.value.apply_to(&config.stack_b)
    );
    println!();

    println!("  {}", s.header.apply_to("Model"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Type"),
        s.method.apply_to(config.transform_type)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Pool size"),
        s.value.apply_to(config.pool_size)
    );
    if let Some(ref output) = config.output_json {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Output"),
            s.path.apply_to(output.display())
        );
    }
    println!();
}

pub fn print_registration_result(config: &RegistrationConfig, output: &RegistrationOutput) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Correspondences"));
    for &(z, count) in &output.correspondences.per_z {
        let tiles = if count == 0 {
            s.disabled.apply_to("no shared tiles".to_string())
        } else {
            s.value.apply_to(format!("{count} tiles"))
        };
        println!("    {:<12}{}", s.label.apply_to(format!("z {z}")), tiles);
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Total"),
        s.value.apply_to(output.correspondences.len())
    );
    println!();

    println!("  {}", s.header.apply_to("Transform"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Model"),
        s.method.apply_to(&output.transform)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("RMS error"),
        s.value.apply_to(format!("{:.3}", output.residual_rms))
    );
    if let Some(ref path) = config.output_json {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Saved to"),
            s.path.apply_to(path.display())
        );
    }
    println!();
}
