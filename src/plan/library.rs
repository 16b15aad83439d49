//! Built-in trainings.

use uuid::{uuid, Uuid};

use crate::metrics::pace::ThresholdPace;
use crate::metrics::zones::Intensity;

use super::item::{Collection, Group, Part, PlanItem, Series};
use super::ordering::recompute_order;
use super::phase::Phase;
use super::snapshot::{ExampleSet, ExampleTraining};
use super::types::DesignMode;

fn part(id: Uuid, name: &str, phase: Phase) -> Part {
    let mut part = Part::new(name, phase);
    part.id = id;
    part
}

fn series(id: Uuid, name: &str, work: Phase, rest: Phase, repetitions: u32) -> Series {
    let mut series = Series::new(name, work, rest, repetitions);
    series.id = id;
    series
}

/// Default session: a zone block, a 6 x 250 m series and a cooldown group.
pub fn default_training() -> Collection {
    let mut central = part(
        uuid!("27008eba-cee6-4d8a-87da-e34d30b668e6"),
        "central",
        Phase::new(83.85, 720.0, false, Some(720.0), DesignMode::Time),
    );
    central.general_order = Some(1);

    let mut reps = series(
        uuid!("f9755058-a631-48f6-913c-4a05723f0381"),
        "series 250x6",
        Phase::new(100.0, 75.0, false, Some(0.25), DesignMode::Distance),
        Phase::new(1.0, 30.0, true, Some(30.0), DesignMode::Time),
        6,
    );
    reps.general_order = Some(2);

    let all_out = part(
        uuid!("ee70b9cd-1928-45f1-9439-4feb98de1485"),
        "Cooldown a tope",
        Phase::new(10.0, 735.0, true, Some(6.0), DesignMode::Distance),
    );
    let relax = series(
        uuid!("0007f8b2-390f-48b4-9bab-84ec90977538"),
        "cooldown relax",
        Phase::new(128.65, 150.0, false, None, DesignMode::Time),
        Phase::new(144.55, 60.0, false, None, DesignMode::Time),
        2,
    );
    let mut cooldown = Group::new("cooldown", vec![all_out.into(), relax.into()]);
    cooldown.id = uuid!("02492452-6c83-4d75-9b36-82d6706e44fe");
    cooldown.general_order = Some(3);

    let mut collection = Collection {
        loose_items: vec![central.into(), reps.into()],
        groups: vec![cooldown],
    };
    recompute_order(&mut collection);
    collection
}

/// Pyramid of 1-2-3-2-1 minute efforts inside a warmup/cooldown frame.
pub fn pyramid_training(threshold: ThresholdPace) -> Collection {
    let rest = Phase::by_time(Intensity::Rpe(2.0), 60);
    let efforts: Vec<PlanItem> = [1, 2, 3, 2, 1]
        .into_iter()
        .map(|minutes| {
            Series::new(
                format!("{}' on", minutes),
                Phase::by_time(Intensity::ZoneRange { fast: 88.0, slow: 92.0 }, minutes * 60),
                rest,
                1,
            )
            .into()
        })
        .collect();

    let mut warmup = Part::new("warmup", Phase::by_distance(Intensity::Zone(130.0), 2.0, threshold));
    warmup.general_order = Some(1);
    let mut pyramid = Group::new("pyramid", efforts);
    pyramid.general_order = Some(2);
    let mut cooldown = Part::new("cooldown", Phase::by_time(Intensity::Zone(140.0), 600));
    cooldown.general_order = Some(3);

    let mut collection = Collection {
        loose_items: vec![warmup.into(), cooldown.into()],
        groups: vec![pyramid],
    };
    recompute_order(&mut collection);
    collection
}

/// Steady long run split into three progressively faster blocks.
pub fn long_run_training(threshold: ThresholdPace) -> Collection {
    let blocks = [("easy", 125.0, 8.0), ("steady", 115.0, 6.0), ("finish", 105.0, 4.0)];
    let mut collection = Collection {
        loose_items: blocks
            .into_iter()
            .map(|(name, zone, km)| Part::new(name, Phase::by_distance(Intensity::Zone(zone), km, threshold)).into())
            .collect(),
        groups: vec![],
    };
    recompute_order(&mut collection);
    collection
}

fn example(name: &str, description: &str, collection: Collection) -> ExampleTraining {
    ExampleTraining {
        name: name.to_string(),
        description: description.to_string(),
        loose_items: collection.loose_items,
        groups: collection.groups,
    }
}

/// Every built-in training as an example set.
pub fn example_set(threshold: ThresholdPace) -> ExampleSet {
    ExampleSet {
        trainings: vec![
            (
                "default".to_string(),
                example("Sesión por defecto", "Bloque central, series de 250 m y vuelta a la calma", default_training()),
            ),
            (
                "pyramid".to_string(),
                example("Pirámide", "1-2-3-2-1 minutos a ritmo de VO2max", pyramid_training(threshold)),
            ),
            (
                "long_run".to_string(),
                example("Tirada larga", "18 km en progresión", long_run_training(threshold)),
            ),
        ],
    }
}
