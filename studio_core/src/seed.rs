//! Built-in sample records for a fresh studio.

use crate::{Contact, EquipmentCategory, Ledger, NewClient, NewEquipment, NewStaff, Result};
use rust_decimal::Decimal;

fn contact(first: &str, last: &str, phone: &str, email: &str) -> Contact {
    Contact {
        first_name: first.into(),
        last_name: last.into(),
        phone: phone.into(),
        email: email.into(),
    }
}

/// Register the sample clients, photographers and equipment
///
/// Records go through the normal add operations, so they take the next
/// free IDs of whatever ledger they are added to.
pub fn seed_sample_data(ledger: &mut Ledger) -> Result<()> {
    // ========================================================================
    // Clients
    // ========================================================================

    ledger.add_client(NewClient {
        contact: contact("Anna", "Ivanova", "+79161234567", "anna@mail.ru"),
    })?;
    ledger.add_client(NewClient {
        contact: contact("Petr", "Sidorov", "+79167654321", "petr@mail.ru"),
    })?;

    // ========================================================================
    // Photographers
    // ========================================================================

    ledger.add_staff(NewStaff {
        contact: contact("Maria", "Petrova", "", ""),
        specialization: "Portrait photography".into(),
        hourly_rate: Decimal::from(2000),
        experience_years: 5,
    })?;
    ledger.add_staff(NewStaff {
        contact: contact("Aleksei", "Kuznetsov", "", ""),
        specialization: "Wedding photography".into(),
        hourly_rate: Decimal::from(3000),
        experience_years: 8,
    })?;

    // ========================================================================
    // Equipment
    // ========================================================================

    let equipment = [
        ("Canon EOS R5", EquipmentCategory::PrimaryDevice, "EOS R5", 1500),
        ("Sony A7III", EquipmentCategory::PrimaryDevice, "A7III", 1200),
        ("85mm Lens", EquipmentCategory::Optic, "85mm f/1.8", 500),
    ];
    for (name, category, model, price) in equipment {
        ledger.add_equipment(NewEquipment {
            name: name.into(),
            category,
            model: model.into(),
            rental_price: Decimal::from(price),
            condition: Some("excellent".into()),
        })?;
    }

    tracing::debug!("Seeded sample studio data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientId, EquipmentId, StaffId};

    #[test]
    fn test_seed_contents() {
        let mut ledger = Ledger::new();
        seed_sample_data(&mut ledger).unwrap();

        assert_eq!(ledger.clients().len(), 2);
        assert_eq!(ledger.staff().len(), 2);
        assert_eq!(ledger.equipment().len(), 3);
        assert!(ledger.sessions().is_empty());

        let anna = ledger.find_client(ClientId(1)).unwrap();
        assert_eq!(anna.contact.full_name(), "Anna Ivanova");

        let wedding = ledger.find_staff(StaffId(2)).unwrap();
        assert_eq!(wedding.hourly_rate, Decimal::from(3000));

        let lens = ledger.find_equipment(EquipmentId(3)).unwrap();
        assert_eq!(lens.category, EquipmentCategory::Optic);
        assert!(lens.available);
    }

    #[test]
    fn test_seed_continues_existing_ids() {
        let mut ledger = Ledger::new();
        ledger.add_client(NewClient::default()).unwrap();
        seed_sample_data(&mut ledger).unwrap();

        let ids: Vec<_> = ledger.clients().iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
