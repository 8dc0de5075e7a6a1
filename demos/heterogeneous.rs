use sovran_any::{any_cast, AnyValue, TypeMismatch};

// Example trait: Measurement
trait Measurement {
    fn describe(&self) -> String;
}

#[derive(Clone)]
struct Temperature {
    celsius: f64,
}

impl Measurement for Temperature {
    fn describe(&self) -> String {
        format!("{:.1} C", self.celsius)
    }
}

#[derive(Clone)]
struct Distance {
    meters: u32,
}

impl Measurement for Distance {
    fn describe(&self) -> String {
        format!("{} m", self.meters)
    }
}

fn describe(value: &AnyValue) -> Result<String, TypeMismatch> {
    if let Ok(t) = value.downcast_ref::<Temperature>() {
        return Ok(t.describe());
    }
    value.downcast_ref::<Distance>().map(|d| d.describe())
}

fn main() -> Result<(), TypeMismatch> {
    let mut readings = vec![
        AnyValue::new(Temperature { celsius: 21.5 }),
        AnyValue::new(Distance { meters: 1200 }),
        AnyValue::new("not a measurement"),
        AnyValue::empty(),
    ];

    for (index, reading) in readings.iter().enumerate() {
        match describe(reading) {
            Ok(text) => println!("Reading {}: {}", index, text),
            Err(e) => println!("Reading {}: {}", index, e),
        }
    }

    // Update a reading in place
    readings[0].downcast_mut::<Temperature>()?.celsius += 1.0;
    println!("Updated reading 0: {}", describe(&readings[0])?);

    // Keep a snapshot, then move a reading out
    let snapshot = readings.clone();
    let moved = readings[1].take();
    println!("Reading 1 still present: {}", readings[1].has_value());
    println!("Moved reading: {}", describe(&moved)?);
    println!("Snapshot reading 1: {}", describe(&snapshot[1])?);

    // Pull out a plain value with the free function
    let label = any_cast::<&str>(&readings[2])?;
    println!("Label: {}", label);

    Ok(())
}
