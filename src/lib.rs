/*!
# CME Certificate Portal

A server-rendered web front-end for a hospital CME (continuing medical
education) feedback and certificate workflow, built in Rust.

## Overview

Attendees verify their registration by email, fill in a five-question
star-rating feedback form, and receive a completion certificate by email
and/or direct download. A separate admin console lets staff review aggregate
rating statistics, browse submitted feedback, and delete entries.

All domain data lives behind a remote HTTP backend; this portal is a pure
front-end that consumes that backend's API and renders the four pages.

## Architecture

- **Page layer**: one module per page, each pairing a GET handler (render)
  with a POST handler (act). Pages are static HTML templates embedded with
  `include_str!` and patched with marker substitution before serving.
- **Backend client**: a typed `reqwest` wrapper with one method per remote
  endpoint. Rejection (non-2xx) and transport failure are distinct errors so
  every page can show its distinct message for each.
- **Identity**: the verified attendee's email and display name, persisted in
  two cookies after verification and read by the feedback and certificate
  pages. Pages that need identity redirect to the entry page when it is
  missing.
- **Admin sessions**: an in-memory map keyed by random id behind a
  browser-session cookie. Nothing is persisted; a restart logs everyone out.
  This gates the console pages only and is not a security boundary.

## Modules

- **config**: environment-driven runtime configuration
- **error**: backend and application error types
- **backend**: client for the remote backend HTTP API
- **identity**: attendee identity cookies
- **rating**: star-rating domain types and the overall-rating derivation
- **entry**: attendance verification page
- **feedback**: feedback questionnaire page
- **certificate**: certificate delivery page (email dispatch + download)
- **admin**: admin console (login, dashboard, deletion)
- **chart**: rating-distribution bar chart
- **site**: shared HTML rendering helpers
- **app**: routing, shared state, and the server loop

## Routes

- `/` + `/verify` - attendance verification
- `/feedback` - questionnaire
- `/certificate` + `/certificate/download` - certificate delivery
- `/admin`, `/admin/login`, `/admin/logout`, `/admin/dashboard`,
  `/admin/chart.png`, `/admin/feedback/{email}/delete` - admin console
- `/static` - stylesheet and page scripts
*/

pub mod admin;
pub mod app;
pub mod backend;
pub mod certificate;
pub mod chart;
pub mod config;
pub mod entry;
pub mod error;
pub mod feedback;
pub mod identity;
pub mod rating;
pub mod site;
