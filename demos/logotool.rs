use clap::{App, Arg, ArgMatches, SubCommand};
use std::fs;
use std::path::PathBuf;

//===========================================================================//

fn color_args<'a, 'b>(command: App<'a, 'b>) -> App<'a, 'b> {
    command
        .arg(
            Arg::with_name("random")
                .long("random")
                .help("Starts from a random color scheme"),
        )
        .arg(
            Arg::with_name("primary")
                .takes_value(true)
                .value_name("COLOR")
                .long("primary")
                .help("Sets the primary color (#rrggbb)"),
        )
        .arg(
            Arg::with_name("secondary")
                .takes_value(true)
                .value_name("COLOR")
                .long("secondary")
                .help("Sets the secondary color (#rrggbb)"),
        )
        .arg(
            Arg::with_name("background")
                .takes_value(true)
                .value_name("COLOR")
                .long("background")
                .help("Sets the background color (#rrggbb)"),
        )
}

fn color_scheme(matches: &ArgMatches) -> logoico::ColorScheme {
    let mut colors = if matches.is_present("random") {
        logoico::ColorScheme::random(&mut rand::thread_rng())
    } else {
        logoico::ColorScheme::default()
    };
    if let Some(color) = matches.value_of("primary") {
        colors.primary = color.parse().unwrap();
    }
    if let Some(color) = matches.value_of("secondary") {
        colors.secondary = color.parse().unwrap();
    }
    if let Some(color) = matches.value_of("background") {
        colors.background = color.parse().unwrap();
    }
    colors
}

fn main() {
    let matches = App::new("logotool")
        .version("0.1")
        .about("Renders logos as PNG or ICO files")
        .subcommand(color_args(
            SubCommand::with_name("render")
                .about("Renders a design to a PNG or ICO file")
                .arg(
                    Arg::with_name("design")
                        .takes_value(true)
                        .value_name("NAME")
                        .long("design")
                        .possible_values(&["gear", "chip", "hex"])
                        .help("Sets the procedural design"),
                )
                .arg(
                    Arg::with_name("size")
                        .takes_value(true)
                        .value_name("PIXELS")
                        .long("size")
                        .help("Sets the output width and height"),
                )
                .arg(
                    Arg::with_name("image")
                        .takes_value(true)
                        .value_name("PNG")
                        .long("image")
                        .conflicts_with_all(&["svg", "design"])
                        .help("Renders a PNG image instead of a design"),
                )
                .arg(
                    Arg::with_name("svg")
                        .takes_value(true)
                        .value_name("SVG")
                        .long("svg")
                        .conflicts_with("design")
                        .help("Renders an SVG file instead of a design"),
                )
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path (.png or .ico)"),
                ),
        ))
        .subcommand(color_args(
            SubCommand::with_name("svg")
                .about("Prints the gear design as editable SVG"),
        ))
        .subcommand(
            SubCommand::with_name("list")
                .about("Describes the icon in an ICO file")
                .arg(Arg::with_name("ico").required(true)),
        )
        .get_matches();
    if let Some(submatches) = matches.subcommand_matches("render") {
        let mut settings = logoico::LogoSettings::default();
        settings.colors = color_scheme(submatches);
        if let Some(name) = submatches.value_of("design") {
            settings.design = name.parse().unwrap();
        }
        if let Some(size) = submatches.value_of("size") {
            settings.size = size.parse::<u32>().unwrap();
        }
        let design = if let Some(path) = submatches.value_of("image") {
            let file = fs::File::open(path).unwrap();
            logoico::Design::Image(logoico::LogoImage::read_png(file).unwrap())
        } else if let Some(path) = submatches.value_of("svg") {
            logoico::Design::Svg(fs::read_to_string(path).unwrap())
        } else {
            settings.design()
        };
        let out_path = match submatches.value_of("output") {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(logoico::ExportFormat::Png.default_file_name()),
        };
        let format = match logoico::ExportFormat::from_path(&out_path) {
            Some(format) => format,
            None => {
                eprintln!("Output path {:?} must end in .png or .ico", out_path);
                std::process::exit(1);
            }
        };
        let data = format
            .export(&design, &settings.colors, settings.size)
            .unwrap();
        fs::write(&out_path, &data).unwrap();
        println!(
            "Wrote {} {}x{} to {:?} ({} bytes)",
            design.name(),
            settings.size,
            settings.size,
            out_path,
            data.len()
        );
    } else if let Some(submatches) = matches.subcommand_matches("svg") {
        print!("{}", logoico::gear_svg(&color_scheme(submatches)));
    } else if let Some(submatches) = matches.subcommand_matches("list") {
        let path = submatches.value_of("ico").unwrap();
        let file = fs::File::open(path).unwrap();
        let container = logoico::IcoContainer::read(file).unwrap();
        let entry = container.entry();
        println!("Resource type: {:?}", container.resource_type());
        println!(
            "{}x{} {}, {} bpp, {} bytes",
            entry.width(),
            entry.height(),
            if entry.is_png() { "PNG" } else { "unknown data" },
            entry.bits_per_pixel(),
            entry.data().len()
        );
    }
}

//===========================================================================//
