use crate::core::file_io::FilePrefix;
use crate::newton::params::NewtonBasinParams;
use crate::newton::render::render_newton_basins;

/// Route a parsed parameter file into the render pipeline, stepping the
/// output path into a per-polynomial sub-directory.
pub fn render_fractal(
    params: &NewtonBasinParams,
    mut file_prefix: FilePrefix,
) -> Result<(), Box<dyn std::error::Error>> {
    file_prefix.create_and_step_into_sub_directory(params.polynomial.output_name());
    render_newton_basins(params, file_prefix)
}
