#[macro_use]
extern crate log;

use std::{error::Error, time::Instant};

use common::{rmse, CsvSeries, MackeyGlass, NpySeries, Sinus, TimeSeriesProvider};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use esn::{Params, ESN};
use rc_plot::{plot, PlotGather};

const RESERVOIR_SIZE: usize = 1000;
const TRAIN_LEN: usize = 1000;
const TEST_LEN: usize = 300;
const SEED: Option<u64> = Some(0);

pub(crate) fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let sources = vec!["Mackey-Glass", "Sinus", "CSV file", "NPY file"];
    let e = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select time series")
        .items(&sources)
        .default(0)
        .interact()?;
    let provider: Box<dyn TimeSeriesProvider> = match e {
        0 => Box::new(MackeyGlass::default()),
        1 => Box::new(Sinus::default()),
        2 => {
            let path: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Path to csv file")
                .interact_text()?;
            let column: usize = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Column index")
                .default(0)
                .interact_text()?;
            Box::new(CsvSeries::from_path(path, column, true)?)
        }
        3 => {
            let path: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Path to npy file")
                .default("mackey-glass.npy".to_string())
                .interact_text()?;
            Box::new(NpySeries::from_path(path)?)
        }
        _ => unreachable!("invalid time series selection"),
    };
    let name = ["mackey_glass", "sinus", "csv", "npy"][e];

    let params = Params {
        seed: SEED,
        ..Params::new(RESERVOIR_SIZE, 1, 1)?
    };
    let t0 = Instant::now();
    let mut rc = ESN::from_params(params)?;
    info!("ESN construction done in {}ms", t0.elapsed().as_millis());

    let t0 = Instant::now();
    let (signal, prediction) = rc.train_and_test(provider.as_ref(), TRAIN_LEN, TRAIN_LEN + TEST_LEN)?;
    info!(
        "training and testing took {}ms, test rmse: {}",
        t0.elapsed().as_millis(),
        rmse(&signal, &prediction)
    );

    std::fs::create_dir_all("img")?;
    let p = PlotGather::from_prediction(TRAIN_LEN, &signal, &prediction);
    plot(
        p.plot_targets(),
        p.test_predictions(),
        &format!("img/{}_esn.png", name),
        (3840, 1080),
    )?;

    Ok(())
}
