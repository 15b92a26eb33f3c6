use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Team {
    pub name: &'static str,
    pub plan: &'static str,
    pub logo: char,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEntry {
    Group {
        title: &'static str,
        icon: char,
        items: &'static [&'static str],
    },
    Link {
        title: &'static str,
        icon: char,
    },
    Footer {
        title: &'static str,
        icon: char,
    },
}

impl NavEntry {
    pub fn icon(&self) -> char {
        match self {
            NavEntry::Group { icon, .. } | NavEntry::Link { icon, .. } | NavEntry::Footer { icon, .. } => {
                *icon
            }
        }
    }
}

pub const TEAMS: [Team; 3] = [
    Team {
        name: "Acme Inc",
        plan: "Enterprise",
        logo: '◧',
    },
    Team {
        name: "Acme Corp.",
        plan: "Startup",
        logo: '∿',
    },
    Team {
        name: "Evil Corp.",
        plan: "Free",
        logo: '⌘',
    },
];

/// The sub item of the Articles group this dashboard shows.
pub const ACTIVE_ITEM: &str = "Generated Articles";

pub const NAV: [NavEntry; 11] = [
    NavEntry::Group {
        title: "Articles",
        icon: '≡',
        items: &[
            "Create Article",
            "Generated Articles",
            "Keyword Projects",
            "AI Keyword to Article",
            "Steal Competitor Keyword",
            "Import Keyword from GSC",
            "Manual Keyword to Article",
            "Bulk Keyword to Article",
            "Longtail Keyword to Article",
            "Article Settings",
        ],
    },
    NavEntry::Link {
        title: "Auto Blog",
        icon: '▤',
    },
    NavEntry::Link {
        title: "Internal Links",
        icon: '⇄',
    },
    NavEntry::Link {
        title: "Free Backlinks",
        icon: '∞',
    },
    NavEntry::Link {
        title: "Integrations",
        icon: '⚇',
    },
    NavEntry::Link {
        title: "Subscription",
        icon: '★',
    },
    NavEntry::Link {
        title: "Affiliate Program",
        icon: '$',
    },
    NavEntry::Link {
        title: "Help Center",
        icon: 'ℹ',
    },
    NavEntry::Link {
        title: "Updates",
        icon: '♪',
    },
    NavEntry::Link {
        title: "Live Chat Support",
        icon: '✉',
    },
    NavEntry::Footer {
        title: "Profile",
        icon: '☺',
    },
];

/// One rendered sidebar line.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarLine {
    Team { logo: char, name: &'static str, plan: &'static str },
    Entry { icon: char, title: &'static str, open: Option<bool> },
    SubItem { title: &'static str, active: bool },
    Separator,
    Icon(char),
}

#[derive(Debug)]
pub struct Sidebar {
    collapsed: bool,
    active_team: usize,
    group_open: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            collapsed: false,
            active_team: 0,
            group_open: true,
        }
    }
}

impl Sidebar {
    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn next_team(&mut self) {
        self.active_team = (self.active_team + 1) % TEAMS.len();
        trace!("Active team: {}", self.active_team().name);
    }

    pub fn active_team(&self) -> &Team {
        &TEAMS[self.active_team]
    }

    pub fn toggle_group(&mut self) {
        self.group_open = !self.group_open;
    }

    /// Lines to draw, collapsed sidebars only show icons.
    pub fn lines(&self) -> Vec<SidebarLine> {
        let team = self.active_team();
        if self.collapsed {
            let mut lines = vec![SidebarLine::Icon(team.logo), SidebarLine::Separator];
            lines.extend(NAV.iter().map(|e| SidebarLine::Icon(e.icon())));
            return lines;
        }

        let mut lines = vec![
            SidebarLine::Team {
                logo: team.logo,
                name: team.name,
                plan: team.plan,
            },
            SidebarLine::Separator,
        ];
        for entry in NAV.iter() {
            match entry {
                NavEntry::Group { title, icon, items } => {
                    lines.push(SidebarLine::Entry {
                        icon: *icon,
                        title: *title,
                        open: Some(self.group_open),
                    });
                    if self.group_open {
                        lines.extend(items.iter().map(|item| SidebarLine::SubItem {
                            title: *item,
                            active: *item == ACTIVE_ITEM,
                        }));
                    }
                }
                NavEntry::Link { title, icon } => lines.push(SidebarLine::Entry {
                    icon: *icon,
                    title: *title,
                    open: None,
                }),
                NavEntry::Footer { title, icon } => {
                    lines.push(SidebarLine::Separator);
                    lines.push(SidebarLine::Entry {
                        icon: *icon,
                        title: *title,
                        open: None,
                    });
                }
            }
        }
        lines
    }
}
