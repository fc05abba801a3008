//! Static site content. Read-only, sourced at build time, never mutated.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    FullStack,
    Frontend,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullStack => "FullStack",
            Self::Frontend => "Frontend",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub link: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Experience {
    pub title: &'static str,
    pub description: &'static str,
    pub date: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Blog Platform",
        description: "A sleek and responsive fullstack blog website built with React, featuring a clean, modern UI. Users can read, create, and manage blog posts with smooth navigation and real-time updates.",
        category: Category::FullStack,
        link: "https://blog-by-abdullah.vercel.app/",
    },
    Project {
        title: "Social Media Platform",
        description: "An eye-catching, responsive social media frontend built with Next.js and styled with Tailwind CSS. It features dynamic feeds, interactive posts, and smooth navigation.",
        category: Category::Frontend,
        link: "https://social-media-by-abdullah.vercel.app/",
    },
    Project {
        title: "NextGenBites",
        description: "A modern, responsive restaurant website with a full-page hero section, dynamic routing, and clean component-based architecture. Pages include Home, About, Menu, and Contact.",
        category: Category::Frontend,
        link: "https://nextgenbites-by-abdullah.vercel.app/",
    },
    Project {
        title: "Shadcn/UI Dashboard",
        description: "A modern, fully responsive frontend dashboard focused purely on clean design, smooth user interactions, and modular, scalable component architecture.",
        category: Category::Frontend,
        link: "https://dashboard-by-abdullah.vercel.app/",
    },
    Project {
        title: "E-Commerce Lite",
        description: "A modern, full-stack e-commerce platform, fully responsive across devices with complete CRUD operations for users, product categories, and products.",
        category: Category::FullStack,
        link: "https://ecommerce-beta-by-abdullah.vercel.app/",
    },
    Project {
        title: "GSAP Animation",
        description: "A sleek game website enhanced with smooth animations for interactive transitions and dynamic gameplay experiences. Every element is brought to life with fluid motion.",
        category: Category::Frontend,
        link: "https://gsap-based-by-abdullah.vercel.app/",
    },
    Project {
        title: "Threads Clone",
        description: "A fullstack Threads clone featuring user authentication, post creation, threaded conversations, and a sleek, responsive interface.",
        category: Category::FullStack,
        link: "https://threads-by-abdullah.vercel.app/",
    },
    Project {
        title: "Minimal Task Manager",
        description: "A simple yet beautifully designed todo app. Users can add, update, and delete tasks, helping them stay organized and focused on any device.",
        category: Category::FullStack,
        link: "https://todo-by-abdullah.vercel.app/",
    },
    Project {
        title: "Landing Page",
        description: "A beautifully crafted frontend for a Kashmir travel application, focused on a smooth user experience with modern UI components and a responsive layout.",
        category: Category::Frontend,
        link: "https://kashmir-travels.vercel.app/",
    },
    Project {
        title: "A.I Powered LazyBot",
        description: "A lightweight, AI-powered, non-serious chatbot backed by a Node.js server. It leverages Google Gemini AI to provide conversational responses with a clean, responsive UI.",
        category: Category::FullStack,
        link: "https://lazy-bot-by-abdullah.vercel.app/",
    },
    Project {
        title: "A.I Powered Calculator",
        description: "A Python-based drawing calculator that lets users sketch mathematical expressions on a canvas, interprets them with AI, and renders the result with LaTeX clarity.",
        category: Category::FullStack,
        link: "https://ai-calculator-by-abdullah.vercel.app/",
    },
];

pub const SKILLS: &[&str] = &[
    "HTML",
    "CSS3",
    "React.js (Vite)",
    "Next.js",
    "Tailwind CSS",
    "Shadcn/UI",
    "Framer Motion",
    "GSAP",
    "Three.js",
    "Node.js",
    "Express.js",
    "Laravel (Soft Skill)",
    "MongoDB",
    "Prisma ORM",
    "SQLite",
    "MySQL",
    "PostgreSQL",
    "React Query",
    "Imagekit.io",
    "Socket.io",
    "Stripe",
    "Clerk",
    "ChatGPT",
    "Cursor AI",
    "OpenAI Integration",
    "Gemini Integration",
    "JavaScript",
    "TypeScript",
    "Python (Soft Skill)",
    "PHP (Soft Skill)",
    "Vercel",
    "Netlify",
    "Render",
    "Hostinger",
    "AWS",
];

pub const EXPERIENCES: &[Experience] = &[
    Experience {
        title: "Next.js Web",
        description: "Building high-performance, server-rendered web applications with a good foundation in the MERN stack, crafting seamless, user-friendly digital experiences.",
        date: "2023-Present",
    },
    Experience {
        title: "MERN Stack Web",
        description: "MongoDB, Express, React, and Node.js applied to seamless, user-friendly applications that deliver powerful digital experiences.",
        date: "2023-Present",
    },
    Experience {
        title: "UX/UI design",
        description: "Responsive, visually appealing interfaces with HTML, CSS, and JavaScript, making the digital experience more enjoyable for everyone.",
        date: "2020-Present",
    },
    Experience {
        title: "Android Studio",
        description: "User-friendly mobile applications in Java with the Android SDK, focused on seamless, high-performance apps tailored to user needs.",
        date: "2021-2022",
    },
    Experience {
        title: "Visual Studio",
        description: "Robust applications in C# on the .NET framework, with an emphasis on problem-solving and clean, continuously updated code.",
        date: "2020-2021",
    },
];

/// The animation clip each about-page scroll section plays on entry, in
/// section order.
pub const SECTION_CLIPS: &[&str] = &["Look_Wave", "Free_Fall", "Sitting", "Look_Wave"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_populated() {
        assert_eq!(PROJECTS.len(), 11);
        assert_eq!(EXPERIENCES.len(), 5);
        assert!(SKILLS.len() > 20);
    }

    #[test]
    fn every_project_links_somewhere() {
        for project in PROJECTS {
            assert!(project.link.starts_with("https://"), "{}", project.title);
            assert!(!project.title.is_empty());
            assert!(!project.description.is_empty());
        }
    }
}
