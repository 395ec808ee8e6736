use jiff::civil::date;
use types::{Ride, RideId, RideStatus, User, UserId, UserRole, UserStatus, Vehicle};

fn user(
    id: &str,
    name: &str,
    email: &str,
    role: UserRole,
    status: UserStatus,
    created_at: jiff::civil::Date,
) -> User {
    User {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        avatar_url: None,
        role,
        status,
        created_at,
        vehicle: match role {
            UserRole::Driver => Some(Vehicle {
                vehicle_type: "Car".to_string(),
                model: "Toyota Axio".to_string(),
            }),
            UserRole::Rider => None,
        },
    }
}

pub fn users() -> Vec<User> {
    use UserRole::*;
    use UserStatus::*;

    vec![
        user("usr_001", "Karim Ahmed", "karim.a@example.com", Driver, Active, date(2023, 1, 15)),
        user("usr_002", "Rahima Begum", "rahima.b@example.com", Rider, Active, date(2023, 2, 20)),
        user("usr_003", "Fahim Hasan", "fahim.h@example.com", Driver, Pending, date(2023, 3, 10)),
        user("usr_004", "Sadia Islam", "sadia.i@example.com", Rider, Blocked, date(2023, 4, 5)),
        user("usr_005", "Jamil Chowdhury", "jamil.c@example.com", Driver, Suspended, date(2023, 5, 12)),
        user("usr_006", "Nusrat Jahan", "nusrat.j@example.com", Rider, Active, date(2023, 6, 18)),
        user("usr_007", "Asif Mahmud", "asif.m@example.com", Driver, Active, date(2023, 7, 22)),
    ]
}

fn avatar(handle: &str) -> Option<String> {
    Some(format!("https://i.pravatar.cc/150?u={handle}"))
}

struct Trip<'a> {
    id: &'a str,
    rider: (&'a str, &'a str),
    driver: (&'a str, &'a str),
    from: &'a str,
    to: &'a str,
    fare: u32,
    status: RideStatus,
    day: i8,
}

impl Trip<'_> {
    fn into_ride(self) -> Ride {
        Ride {
            id: RideId::new(self.id),
            rider_name: self.rider.0.to_string(),
            driver_name: self.driver.0.to_string(),
            rider_avatar_url: avatar(self.rider.1),
            driver_avatar_url: avatar(self.driver.1),
            pickup_location: self.from.to_string(),
            dropoff_location: self.to.to_string(),
            fare: self.fare,
            status: self.status,
            ride_date: date(2023, 8, self.day),
        }
    }
}

pub fn rides() -> Vec<Ride> {
    use RideStatus::*;

    const RAHIMA: (&str, &str) = ("Rahima Begum", "rahima");
    const SADIA: (&str, &str) = ("Sadia Islam", "sadia");
    const NUSRAT: (&str, &str) = ("Nusrat Jahan", "nusrat");
    const FAHIM: (&str, &str) = ("Fahim Hasan", "fahim");
    const ASIF: (&str, &str) = ("Asif Mahmud", "asif");
    const KARIM: (&str, &str) = ("Karim Ahmed", "karim");
    const JAMIL: (&str, &str) = ("Jamil Chowdhury", "jamil");

    [
        Trip { id: "ride_001", rider: RAHIMA, driver: KARIM, from: "Dhanmondi 32", to: "Gulshan 1", fare: 250, status: Completed, day: 15 },
        Trip { id: "ride_002", rider: SADIA, driver: ASIF, from: "Mirpur 10", to: "Uttara Sector 12", fare: 350, status: Completed, day: 15 },
        Trip { id: "ride_003", rider: NUSRAT, driver: FAHIM, from: "Banani", to: "Mohakhali", fare: 150, status: InProgress, day: 16 },
        Trip { id: "ride_004", rider: FAHIM, driver: JAMIL, from: "Bashundhara R/A", to: "Baridhara DOHS", fare: 180, status: Cancelled, day: 16 },
        Trip { id: "ride_005", rider: ASIF, driver: KARIM, from: "Motijheel", to: "Lalbagh Fort", fare: 220, status: Completed, day: 17 },
        Trip { id: "ride_006", rider: RAHIMA, driver: ASIF, from: "Farmgate", to: "New Market", fare: 120, status: Searching, day: 18 },
    ]
    .into_iter()
    .map(Trip::into_ride)
    .collect()
}
