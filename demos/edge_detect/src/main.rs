use argh::FromArgs;
use std::{fs::File, io::BufReader, path::PathBuf};

use sobel::{
    image::{ops, Image, ImageSize},
    imgproc::{orientation::RandomColors, params::SobelParams, pipeline::detect_edges},
};

#[derive(FromArgs)]
/// Detect edges with the Sobel operator and show every intermediate image
struct Args {
    /// path to the input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to a JSON file overriding the default parameters
    #[argh(option)]
    config: Option<PathBuf>,

    /// seed for the arrow colors, random on every run when absent
    #[argh(option)]
    seed: Option<u64>,

    /// convert the input to grayscale, enabling the orientation overlay
    #[argh(switch)]
    gray: bool,
}

fn load_params(path: Option<&PathBuf>) -> Result<SobelParams, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(SobelParams::default());
    };
    log::info!("loading parameters from {}", path.display());
    let params = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    Ok(params)
}

fn log_image<const C: usize>(
    rec: &rerun::RecordingStream,
    name: &str,
    image: &Image<f32, C>,
) -> Result<(), Box<dyn std::error::Error>> {
    let color_model = match C {
        1 => rerun::ColorModel::L,
        3 => rerun::ColorModel::RGB,
        _ => return Err(format!("cannot display a {C} channel image").into()),
    };
    let image_u8 = ops::saturate_to_u8(image);
    rec.log(
        name,
        &rerun::Image::from_elements(image_u8.as_slice(), image_u8.size().into(), color_model),
    )?;
    Ok(())
}

fn run<const C: usize>(
    rec: &rerun::RecordingStream,
    image: Image<u8, C>,
    params: &SobelParams,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let image_f32 = image.cast::<f32>()?;

    let mut colors = match seed {
        Some(seed) => RandomColors::seeded(seed),
        None => RandomColors::from_entropy(),
    };

    let maps = detect_edges(&image_f32, params, &mut colors)?;

    log_image(rec, "input", &image_f32)?;
    log_image(rec, "Ix", &maps.ix)?;
    log_image(rec, "Iy", &maps.iy)?;
    log_image(rec, "magnitude", &maps.magnitude)?;
    if let Some(orientation) = &maps.orientation {
        log_image(rec, "orientation", orientation)?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let params = load_params(args.config.as_ref())?;

    // start the recording stream
    let rec = rerun::RecordingStreamBuilder::new("Sobel Edge Detection").spawn()?;

    let decoded = image::open(&args.image_path)?;
    let size = ImageSize {
        width: decoded.width() as usize,
        height: decoded.height() as usize,
    };
    log::info!("read {} from {}", size, args.image_path.display());

    if args.gray {
        let gray = Image::<u8, 1>::new(size, decoded.to_luma8().into_raw())?;
        run(&rec, gray, &params, args.seed)?;
    } else {
        let rgb = Image::<u8, 3>::new(size, decoded.to_rgb8().into_raw())?;
        run(&rec, rgb, &params, args.seed)?;
    }

    println!("Finished processing. Closing app.");

    Ok(())
}
