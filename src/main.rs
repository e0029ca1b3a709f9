use clap::Parser;

use newton_basins::cli::args::{CommandsEnum, NewtonBasinsArgs};
use newton_basins::cli::render::render_fractal;
use newton_basins::core::file_io::{
    build_output_path_with_date_time, extract_base_name, maybe_date_time_string, FilePrefix,
};
use newton_basins::newton::params::NewtonBasinParams;

fn main() {
    let args: NewtonBasinsArgs = NewtonBasinsArgs::parse();

    let newton_basin_params = |path: &str| -> NewtonBasinParams {
        serde_json::from_str(&std::fs::read_to_string(path).expect("Unable to read param file"))
            .expect("Unable to parse param file")
    };

    match &args.command {
        Some(CommandsEnum::Render(params)) => {
            let file_prefix = FilePrefix {
                directory_path: build_output_path_with_date_time(
                    &params.params_path,
                    "render",
                    &maybe_date_time_string(params.date_time_out),
                ),
                file_base: extract_base_name(&params.params_path).to_owned(),
            };

            render_fractal(&newton_basin_params(&params.params_path), file_prefix).unwrap();
        }

        Some(CommandsEnum::Check(params)) => {
            match newton_basin_params(&params.params_path).validate() {
                Ok(()) => println!("INFO:  parameter file is valid: {}", params.params_path),
                Err(err) => {
                    eprintln!("ERROR:  invalid parameter file: {}", err);
                    std::process::exit(1);
                }
            }
        }

        None => {
            println!("Default command (nothing specified!)");
        }
    }
}
