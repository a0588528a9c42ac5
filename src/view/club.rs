use crate::{
    core::{
        error::{AppError, AppResult},
        identity::validate_email,
    },
    schema::club::{
        ClubResponse, ContactDetails, ContactRequest, HeroStat, TeamMember, TitledText,
    },
};

pub const CLUB_NAME: &str = "The Dink Syndicate";
pub const CONTACT_EMAIL: &str = "contact@dinksyndicate.com";
pub const CONTACT_THANKS: &str = "Thank you for reaching out! We'll get back to you soon.";

const TEAM: [(&str, &str, &str); 5] = [
    (
        "VVS Basanth Pedapati",
        "Singles & Doubles Specialist",
        "Sharp Angles & Strategic Play",
    ),
    ("Kushaal Varma", "Doubles Powerhouse", "Explosive Power Play"),
    (
        "Likhitha Landa",
        "Aggressive Attacker",
        "Power Game & Relentless Offense",
    ),
    (
        "Jayanth Babu",
        "Net Dominator",
        "Precision Net Game & Devastating Smashes",
    ),
    (
        "Sai Teja",
        "Singles Specialist",
        "Agility & Supreme Court Coverage",
    ),
];

const PILLARS: [(&str, &str); 4] = [
    ("Excellence", "Daily practice and continuous improvement"),
    ("Unity", "Stronger together as a syndicate"),
    ("Global Vision", "Eyes on international tournaments"),
    ("Passion", "Love for the game drives us forward"),
];

const ACHIEVEMENTS: [(&str, &str); 4] = [
    (
        "National Championship Qualifiers",
        "Consistently qualifying for India's premier pickleball tournaments",
    ),
    (
        "Regional Tournament Wins",
        "Multiple victories across state and regional level competitions",
    ),
    (
        "Pro Player Rankings",
        "Team members ranked among top pickleball players in India",
    ),
    (
        "Community Growth",
        "Growing network of players and supporters across the country",
    ),
];

fn titled(items: &[(&str, &str)]) -> Vec<TitledText> {
    items
        .iter()
        .map(|(title, description)| TitledText {
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|x| x.to_string()).collect()
}

pub fn club_content() -> ClubResponse {
    ClubResponse {
        name: CLUB_NAME.to_string(),
        tagline: "An elite community of pro pickleball players competing at national level \
                  tournaments across India. We're on a mission to take our game to the global stage."
            .to_string(),
        founded: "Since 2025 • India".to_string(),
        hero_stats: [("15+", "Tournaments"), ("5", "Pro Players"), ("1", "Dream Goal")]
            .iter()
            .map(|(value, label)| HeroStat {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect(),
        story: strings(&[
            "Founded in 2025, The Dink Syndicate emerged from a shared passion for pickleball \
             and an unwavering commitment to excellence. What started as a group of friends \
             practicing together has evolved into one of India's most dedicated pro pickleball \
             communities.",
            "We actively compete in national level tournaments across India, constantly pushing \
             our limits and refining our skills. Our goal? To represent India on the \
             international stage and bring glory to our nation in this rapidly growing sport.",
        ]),
        mission: "To elevate Indian pickleball to the world stage by fostering talent, building \
                  community, and competing with relentless passion at every level."
            .to_string(),
        pillars: titled(&PILLARS),
        team: TEAM
            .iter()
            .map(|(name, role, specialty)| TeamMember {
                name: name.to_string(),
                role: role.to_string(),
                specialty: specialty.to_string(),
            })
            .collect(),
        achievements: titled(&ACHIEVEMENTS),
        international_goals: strings(&[
            "Asia Pacific Championships",
            "US Open Pickleball Championships",
            "World Pickleball Championship",
        ]),
        contact: ContactDetails {
            location: "India".to_string(),
            email: CONTACT_EMAIL.to_string(),
            social: "@TheDinkSyndicate".to_string(),
            looking_for: strings(&[
                "Sponsors & Brand Partners",
                "International Tournament Opportunities",
                "Training Collaborations",
                "Equipment & Gear Partners",
            ]),
        },
    }
}

/// Submissions are only logged.
pub fn submit_contact(req: &ContactRequest) -> AppResult<&'static str> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("message is required".to_string()));
    }
    validate_email(req.email.trim())
        .map_err(|_| AppError::Validation("a valid email address is required".to_string()))?;

    tracing::info!(
        "contact form submitted by {} <{}>, subject {:?}: {}",
        req.name,
        req.email,
        req.subject,
        req.message
    );
    Ok(CONTACT_THANKS)
}
