//! Prints the members of an object the way a field editor would show them.

use dob_typesystem::container::{
    ContainerBase, Float64Container, Int32Container, Object, SequenceContainer, StringContainer,
    StringSequenceContainer,
};
use dob_typesystem::{delta, impl_object, ArrayContainer, CollectionType};

#[derive(Debug, Clone)]
struct Aircraft {
    callsign: StringContainer,
    altitude: Float64Container,
    squawk: Int32Container,
    engines: ArrayContainer<Float64Container>,
    route: SequenceContainer<String>,
}

impl_object!(
    Aircraft,
    "Demo.Aircraft",
    [callsign, altitude, squawk, engines, route]
);

fn format_single(member: &dyn ContainerBase) -> String {
    if member.is_null() {
        return "NULL".to_string();
    }
    let any = member.as_any();
    if let Some(c) = any.downcast_ref::<StringContainer>() {
        c.get_or_null().map(|v| format!("\"{}\"", v)).unwrap_or_default()
    } else if let Some(c) = any.downcast_ref::<Float64Container>() {
        c.get_or_null().map(|v| format!("{:.1}", v)).unwrap_or_default()
    } else if let Some(c) = any.downcast_ref::<Int32Container>() {
        c.get_or_null().map(|v| format!("{}", v)).unwrap_or_default()
    } else {
        format!("<{:?}>", member.member_type())
    }
}

fn format_member(member: &dyn ContainerBase) -> String {
    match member.collection_type() {
        CollectionType::Single => format_single(member),
        CollectionType::Array => match member.as_any().downcast_ref::<ArrayContainer<Float64Container>>() {
            Some(arr) => {
                let slots: Vec<String> = arr
                    .iter()
                    .map(|s| {
                        let mark = if s.is_changed() { "*" } else { "" };
                        format!("{}{}", format_single(s), mark)
                    })
                    .collect();
                format!("[{}]", slots.join(", "))
            }
            None => format!("<array of {:?}>", member.member_type()),
        },
        CollectionType::Sequence => match member.as_any().downcast_ref::<StringSequenceContainer>() {
            Some(seq) => format!("{:?} (count {})", seq.as_slice(), seq.len()),
            None => format!("<sequence of {:?}>", member.member_type()),
        },
        CollectionType::Dictionary => format!("<dictionary of {:?}>", member.member_type()),
    }
}

fn print_object(obj: &dyn Object) {
    println!("{} ({})", obj.type_name(), obj.object_type());
    for i in 0..obj.member_count() {
        let Some(member) = obj.member(i) else { continue };
        let changed = if member.is_changed() { "changed" } else { "" };
        println!(
            "  {:<10} {:<40} {}",
            obj.member_name(i).unwrap_or("?"),
            format_member(member),
            changed
        );
    }
}

fn main() {
    let mut aircraft = Aircraft {
        callsign: StringContainer::new(),
        altitude: Float64Container::new(),
        squawk: Int32Container::new(),
        engines: ArrayContainer::new(2),
        route: SequenceContainer::new(),
    };

    aircraft.callsign.set_val("SAAB101".to_string());
    aircraft.altitude.set_val(10_500.0);
    aircraft.route.push("ESGG".to_string());
    aircraft.route.push("ESSA".to_string());

    println!("=== After construction ===");
    print_object(&aircraft);

    // Pretend the object was sent; only later edits are part of the next delta.
    delta::set_changed(&mut aircraft, false);
    aircraft.squawk.set_val(7000);
    if let Ok(engine) = aircraft.engines.slot_mut(1) {
        engine.set_val(87.5);
    }

    println!("\n=== Next delta ===");
    print_object(&aircraft);
    println!("changed members: {:?}", delta::changed_members(&aircraft));
}
