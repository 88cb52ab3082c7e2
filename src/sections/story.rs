use leptos::prelude::*;

use crate::history::Link;
use crate::reveal::{Reveal, RevealVariant};

/// Copy for one static marketing section below the hero.
pub struct StoryBlockData {
    pub title: &'static str,
    pub body: &'static str,
    pub image_url: &'static str,
    pub image_alt: &'static str,
    pub reverse: bool,
    /// Optional call to action: (target path, label).
    pub cta: Option<(&'static str, &'static str)>,
}

pub static STORY_BLOCKS: [StoryBlockData; 4] = [
    StoryBlockData {
        title: "About Warehouse Robots",
        body: "Anscer Robotics designs advanced warehouse robots, including Pallet \
               Lifter Robots (PLR), Articulated Robots (AR), and Automated Guided \
               Vehicles (AGVs). These robots streamline material handling, \
               palletizing, and transportation tasks, reducing manual labor and \
               boosting throughput. Equipped with AI-driven navigation and precision \
               sensors, our robots ensure safe and efficient operations, transforming \
               warehouses into smart, scalable logistics hubs.",
        image_url: "https://images.pexels.com/photos/1632790/pexels-photo-1632790.jpeg?auto=compress&cs=tinysrgb&w=600",
        image_alt: "Warehouse robot transporting goods",
        reverse: false,
        cta: None,
    },
    StoryBlockData {
        title: "How Warehouse Automation Works",
        body: "The warehouse automation industry, led by innovators like Anscer \
               Robotics, combines robotics, AI, and IoT to optimize logistics. Our \
               PLR, AR, and AGV robots are designed for tasks like palletizing, \
               picking, and transporting goods. Integrated with warehouse management \
               systems (WMS), they use real-time data and machine learning for \
               precise navigation and task execution. This results in faster order \
               processing, reduced errors, and scalable operations tailored to modern \
               e-commerce and supply chain demands.",
        image_url: "https://images.pexels.com/photos/2599244/pexels-photo-2599244.jpeg?auto=compress&cs=tinysrgb&w=600",
        image_alt: "Automated warehouse operations",
        reverse: true,
        cta: None,
    },
    StoryBlockData {
        title: "How Warehouse Robotics Enhances Safety",
        body: "Anscer Robotics' warehouse solutions prioritize safety through \
               advanced sensors (e.g., LIDAR, cameras) and AI-driven obstacle \
               detection. Our PLR, AR, and AGV robots navigate complex warehouse \
               environments, avoiding collisions and ensuring smooth operations. \
               Robust safety protocols and real-time monitoring reduce workplace \
               injuries by automating heavy lifting and repetitive tasks, creating a \
               safer environment for workers and enabling compliance with stringent \
               safety standards.",
        image_url: "https://robotnik.eu/wp-content/uploads/2023/06/RB-WATCHER_ROBOTNIK_2-scaled.jpg",
        image_alt: "AGV robot in warehouse",
        reverse: false,
        cta: None,
    },
    StoryBlockData {
        title: "How Warehouse Robots Transform Logistics",
        body: "Anscer Robotics' PLR, AR, and AGV robots revolutionize warehouse \
               logistics by automating material handling, reducing operational costs, \
               and accelerating order fulfillment. These robots enhance scalability, \
               allowing warehouses to handle peak demands efficiently. By integrating \
               with IoT and data analytics, our solutions minimize errors, optimize \
               inventory management, and promote sustainability, driving the future \
               of smart, cost-effective, and agile supply chains.",
        image_url: "https://images.pexels.com/photos/373543/pexels-photo-373543.jpeg?auto=compress&cs=tinysrgb&w=600",
        image_alt: "Warehouse automation system",
        reverse: true,
        cta: Some(("/Dashboard", "Learn More")),
    },
];

#[component]
pub fn StoryBlock(block: &'static StoryBlockData) -> impl IntoView {
    let section_class = if block.reverse {
        "story story-reverse"
    } else {
        "story"
    };
    view! {
        <section class=section_class>
            <div class="container story-grid">
                <div class="story-text">
                    <Reveal variant=RevealVariant::Heading>
                        <h2 class="section-title">{block.title}</h2>
                    </Reveal>
                    <Reveal variant=RevealVariant::Copy>
                        <p class="section-description">{block.body}</p>
                    </Reveal>
                    {block
                        .cta
                        .map(|(to, label)| view! { <Link to=to class="btn btn-primary">{label}</Link> })}
                </div>
                <div class="story-media">
                    <Reveal variant=RevealVariant::Media>
                        <img src=block.image_url alt=block.image_alt class="story-image"/>
                    </Reveal>
                </div>
            </div>
        </section>
    }
}
