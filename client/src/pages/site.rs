//! Static site content: home programs and projects, about, team, and stories.
//!
//! None of this comes from the backend; front ends render it as-is.

#[cfg(test)]
#[path = "site_test.rs"]
mod site_test;

pub const ORGANIZATION: &str = "Reliance Soul International Youth Foundation";
pub const TAGLINE: &str =
    "Empowering young refugees and IDPs through creativity, innovation, and opportunity.";

/// Titled blurb used for programs, projects, and about sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub body: &'static str,
}

pub const PROGRAMS: [Section; 3] = [
    Section {
        title: "Music Workshops",
        body: "Group & 1:1 sessions focused on performance, song composition, instruments, and production basics.",
    },
    Section { title: "Dance Classes", body: "Movement, choreography, and confidence-building sessions for all levels." },
    Section {
        title: "Portraits Design & Crafts",
        body: "Practical design sessions: visuals, crafts, and digital creativity.",
    },
];

pub const PROJECTS: [Section; 4] = [
    Section {
        title: "Community Music Initiative",
        body: "Empowering voices together for unity, learning, and cultural expression.",
    },
    Section {
        title: "Art for Healing Program",
        body: "Using art and creativity to support emotional healing and wellbeing.",
    },
    Section { title: "Body Movement", body: "Using dance for healing, social cohesion, and cultural empowerment." },
    Section {
        title: "Skill Building Programs",
        body: "Empowerment in fashion design, pencil portrait, and artisan skill-building for youth empowerment.",
    },
];

pub const ABOUT: [Section; 3] = [
    Section {
        title: "Our Journey",
        body: "The foundation began with a simple idea: that art can be more than expression. It can be a force \
               for healing and transformation. From community stages to refugee settlements, creativity sparks \
               hope, rebuilds confidence, and unites people across different backgrounds.",
    },
    Section {
        title: "Vision",
        body: "Reached, Touched, and Changed marginalized souls for freedom and self-reliance.",
    },
    Section {
        title: "Mission",
        body: "To empower young refugees and marginalized individuals through arts, cultural expression, \
               vocational skills, and psychosocial support, fostering healing, leadership, and sustainable \
               livelihoods.",
    },
];

// =============================================================================
// TEAM
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamMember {
    pub name: &'static str,
    pub title: &'static str,
    pub bio: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeamGroup {
    Board,
    Executive,
    Volunteers,
}

impl TeamGroup {
    pub const ALL: [Self; 3] = [Self::Board, Self::Executive, Self::Volunteers];

    pub fn heading(self) -> &'static str {
        match self {
            Self::Board => "Board of Directors",
            Self::Executive => "Executive Team",
            Self::Volunteers => "Volunteers",
        }
    }

    pub fn members(self) -> &'static [TeamMember] {
        match self {
            Self::Board => &BOARD,
            Self::Executive => &EXECUTIVE,
            Self::Volunteers => &VOLUNTEERS,
        }
    }
}

static BOARD: [TeamMember; 6] = [
    TeamMember { name: "Blaise Muhume", title: "Board Chair", bio: "" },
    TeamMember {
        name: "Neema G. Wereje",
        title: "Board Member",
        bio: "With a background in Business Administration at Andrews University (USA), Neema is passionate \
              about developing sustainable livelihoods across Africa.",
    },
    TeamMember {
        name: "Borauzima H. Adelard",
        title: "Board Member",
        bio: "Passionate about community growth, global citizenship, and computer science.",
    },
    TeamMember { name: "Esther Dechy", title: "Board Member", bio: "Dedicated to youth empowerment and leadership transformation." },
    TeamMember { name: "Elie Magambo", title: "Board Member", bio: "" },
    TeamMember { name: "Chadrack Ndamiye", title: "Board Member", bio: "" },
];

static EXECUTIVE: [TeamMember; 6] = [
    TeamMember { name: "Adelard Borauzima", title: "Chief Executive Officer", bio: "Guides the organization with vision and strategy." },
    TeamMember { name: "Sonia Glorone", title: "Chief Finance Officer", bio: "Manages financial planning and operations." },
    TeamMember {
        name: "Daima Nyamusuma",
        title: "Creative Programs Director",
        bio: "Committed to providing artistic programs to empower young people.",
    },
    TeamMember {
        name: "Naomi Aluel Ateng Magot",
        title: "Grants and Donor Relations",
        bio: "Oversees partnerships and donor engagement.",
    },
    TeamMember {
        name: "Jean-Paul Prospere",
        title: "Director of Sustainable Programs",
        bio: "Leads income-generating activities for the foundation's long-term growth.",
    },
    TeamMember {
        name: "Joseph Masirika",
        title: "Director of Communications and Media",
        bio: "Responsible for the foundation's communication and media strategy.",
    },
];

/// Volunteers list their department as the title.
static VOLUNTEERS: [TeamMember; 6] = [
    TeamMember { name: "Aimable Ngendero", title: "Sustainable Programs", bio: "" },
    TeamMember { name: "Clarice Ntabala", title: "Finance Department", bio: "" },
    TeamMember { name: "G. Gentil", title: "Creative Department", bio: "" },
    TeamMember { name: "Mayala Joyce", title: "Grants and Donor Relations", bio: "" },
    TeamMember { name: "Anuani Fidel", title: "Creative Department", bio: "" },
    TeamMember { name: "Jetty Petter", title: "Finance Department", bio: "" },
];

// =============================================================================
// STORIES
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Story {
    pub name: &'static str,
    pub story: &'static str,
    pub impact: &'static str,
}

pub const STORIES: [Story; 2] = [
    Story {
        name: "Neema Gloria Wereje",
        story: "Born and raised in Uganda after her parents fled conflict, Neema grew up as a refugee. Visiting the \
                DRC in December 2020, she was moved by the talent of young performers and, with co-founder \
                Adelard Borauzima, launched the Reliance Soul Youth Initiative to reduce poverty through art, \
                music, education, and entrepreneurship.",
        impact: "Art gave me a voice when I thought I had none. Now I mentor other young people to use creativity \
                 for positive change.",
    },
    Story {
        name: "Adelard Hanzira Borauzima",
        story: "Internally displaced as a child and later a refugee in Uganda, Adelard found in music a lifeline \
                and a source of healing. He now offers displaced and refugee youth the same chance to find hope \
                and self-reliance through music, arts, and vocational skills.",
        impact: "Giving back is an absolute joy. Now I teach others to let their heartbeat guide their purpose.",
    },
];

/// Look up a team member across every group, ignoring case.
pub fn find_member(name: &str) -> Option<(TeamGroup, &'static TeamMember)> {
    let needle = name.trim();
    TeamGroup::ALL
        .into_iter()
        .flat_map(|group| group.members().iter().map(move |member| (group, member)))
        .find(|(_, member)| member.name.eq_ignore_ascii_case(needle))
}
