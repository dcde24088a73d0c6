// List every ISO14443A target in the field of the first reader.
//
// Needs a system libnfc; run with `cargo run --example list_targets --features libnfc`.

use pn53x::prelude::*;

fn main() -> Result<()> {
    env_logger::init();
    println!("libnfc {}", pn53x::version()?);

    let readers = pn53x::list_devices()?;
    if readers.is_empty() {
        println!("No NFC reader found");
        return Ok(());
    }
    for r in &readers {
        println!("found {}", r);
    }

    let mut dev = pn53x::open("")?;
    dev.initiator_init()?;
    println!("{} opened", dev.name());

    let a106 = Modulation::new(ModulationKind::Iso14443a, BaudRate::Br106);
    let targets = dev.initiator_list_passive_targets(a106)?;
    println!("{} ISO14443A passive target(s) found:", targets.len());
    for t in &targets {
        print!("{}", pn53x::device::global().render_target(t, false)?);
        if let Some(a) = t.as_iso14443a() {
            if let Some(hb) = a.historical_bytes() {
                println!("  historical bytes: {}", hex(hb));
            }
        }
    }

    dev.close();
    Ok(())
}
