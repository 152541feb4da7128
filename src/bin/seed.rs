//! Loads the demo catalog of cities and activities into an empty database.

use dotenvy::dotenv;

use globetrotter::db::{establish_connection_pool, run_migrations};
use globetrotter::domain::activity::NewActivity;
use globetrotter::domain::city::NewCity;
use globetrotter::domain::types::{
    ActivityCategory, ActivityName, Amount, CityName, CostIndex, CountryName, ImageUrl,
    NonEmptyString, Rating, SanitizedText, TypeConstraintError,
};
use globetrotter::models::config::ServerConfig;
use globetrotter::repository::errors::{RepositoryError, RepositoryResult};
use globetrotter::repository::{
    ActivityWriter, CityListQuery, CityReader, CityWriter, DieselRepository,
};

struct CitySeed {
    name: &'static str,
    country: &'static str,
    region: &'static str,
    image_url: &'static str,
    cost_index: CostIndex,
    rating: f64,
    description: &'static str,
}

struct ActivitySeed {
    city: &'static str,
    name: &'static str,
    description: &'static str,
    image_url: &'static str,
    duration_minutes: i32,
    cost: f64,
    category: ActivityCategory,
}

const CITIES: &[CitySeed] = &[
    CitySeed {
        name: "Paris",
        country: "France",
        region: "Europe",
        image_url: "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?w=600",
        cost_index: CostIndex::Expensive,
        rating: 4.9,
        description: "The City of Lights, known for its art, fashion, and romantic atmosphere.",
    },
    CitySeed {
        name: "Tokyo",
        country: "Japan",
        region: "Asia",
        image_url: "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=600",
        cost_index: CostIndex::Expensive,
        rating: 4.8,
        description: "A dazzling blend of ultra-modern and traditional Japanese culture.",
    },
    CitySeed {
        name: "Barcelona",
        country: "Spain",
        region: "Europe",
        image_url: "https://images.unsplash.com/photo-1583422409516-2895a77efded?w=600",
        cost_index: CostIndex::Moderate,
        rating: 4.7,
        description: "Mediterranean vibes with stunning Gaudí architecture and beaches.",
    },
    CitySeed {
        name: "Bali",
        country: "Indonesia",
        region: "Asia",
        image_url: "https://images.unsplash.com/photo-1537996194471-e657df975ab4?w=600",
        cost_index: CostIndex::Budget,
        rating: 4.7,
        description: "Tropical paradise with spiritual temples and lush landscapes.",
    },
    CitySeed {
        name: "New York",
        country: "USA",
        region: "Americas",
        image_url: "https://images.unsplash.com/photo-1496442226666-8d4d0e62e6e9?w=600",
        cost_index: CostIndex::Luxury,
        rating: 4.8,
        description: "The city that never sleeps, a global hub of culture and commerce.",
    },
    CitySeed {
        name: "Marrakech",
        country: "Morocco",
        region: "Africa",
        image_url: "https://images.unsplash.com/photo-1597212618440-806262de4f6b?w=600",
        cost_index: CostIndex::Budget,
        rating: 4.5,
        description: "Vibrant markets, stunning palaces, and rich Moroccan traditions.",
    },
];

const ACTIVITIES: &[ActivitySeed] = &[
    ActivitySeed {
        city: "Paris",
        name: "Eiffel Tower Sunset Visit",
        description: "Skip-the-line access to the top of Paris's iconic landmark at sunset.",
        image_url: "https://images.unsplash.com/photo-1543349689-9a4d426bee8e?w=400",
        duration_minutes: 120,
        cost: 45.0,
        category: ActivityCategory::Sightseeing,
    },
    ActivitySeed {
        city: "Tokyo",
        name: "Sushi Making Class",
        description: "Learn to make authentic sushi from a master chef in Tsukiji.",
        image_url: "https://images.unsplash.com/photo-1579871494447-9811cf80d66c?w=400",
        duration_minutes: 180,
        cost: 85.0,
        category: ActivityCategory::Food,
    },
    ActivitySeed {
        city: "Bali",
        name: "Bali Sunrise Volcano Hike",
        description: "Trek to the summit of Mount Batur for a breathtaking sunrise view.",
        image_url: "https://images.unsplash.com/photo-1518548419970-58e3b4079ab2?w=400",
        duration_minutes: 360,
        cost: 55.0,
        category: ActivityCategory::Adventure,
    },
    ActivitySeed {
        city: "Barcelona",
        name: "Flamenco Show & Tapas",
        description: "Authentic flamenco performance in the Gothic Quarter with tapas dinner.",
        image_url: "https://images.unsplash.com/photo-1533174072545-7a4b6ad7a6c3?w=400",
        duration_minutes: 180,
        cost: 70.0,
        category: ActivityCategory::Culture,
    },
];

fn new_city(seed: &CitySeed) -> Result<NewCity, TypeConstraintError> {
    Ok(NewCity {
        name: CityName::new(seed.name)?,
        country: CountryName::new(seed.country)?,
        region: Some(NonEmptyString::new(seed.region)?),
        image_url: Some(ImageUrl::new(seed.image_url)?),
        cost_index: seed.cost_index,
        rating: Rating::new(seed.rating)?,
        description: Some(SanitizedText::new(seed.description)?),
    })
}

fn seed<R>(repo: &R) -> RepositoryResult<()>
where
    R: CityReader + CityWriter + ActivityWriter,
{
    if !repo
        .list_cities(CityListQuery::new().paginate(0, 1))?
        .is_empty()
    {
        log::info!("Data already exists.");
        return Ok(());
    }

    let new_cities = CITIES
        .iter()
        .map(new_city)
        .collect::<Result<Vec<_>, _>>()?;
    let cities = repo.create_cities(&new_cities)?;
    log::info!("Seeded {} cities", cities.len());

    let new_activities = ACTIVITIES
        .iter()
        .map(|seed| -> RepositoryResult<NewActivity> {
            let city = cities
                .iter()
                .find(|c| c.name.as_str() == seed.city)
                .ok_or(RepositoryError::NotFound)?;
            Ok(NewActivity {
                city_id: city.id,
                name: ActivityName::new(seed.name)?,
                description: Some(SanitizedText::new(seed.description)?),
                image_url: Some(ImageUrl::new(seed.image_url)?),
                duration_minutes: Some(seed.duration_minutes),
                cost: Amount::new(seed.cost)?,
                category: seed.category,
            })
        })
        .collect::<RepositoryResult<Vec<_>>>()?;
    let inserted = repo.create_activities(&new_activities)?;
    log::info!("Seeded {inserted} activities");

    Ok(())
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to establish database connection: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run_migrations(&pool) {
        log::error!("Failed to run migrations: {err}");
        std::process::exit(1);
    }

    if let Err(err) = seed(&DieselRepository::new(pool)) {
        log::error!("Seeding failed: {err}");
        std::process::exit(1);
    }
}
